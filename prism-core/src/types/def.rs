use core::fmt;

use super::{ScalarType, Shape, StructType};

/// The semantic definition of a shape: is it a scalar, a pointer, a list, a map, a struct?
#[derive(Clone, Copy)]
pub enum Def {
    /// Leaf value, not composed of other reflected values.
    ///
    /// e.g. `u32`, `String`, `bool`
    Scalar(ScalarType),

    /// Something pointing at zero or one value of another shape.
    ///
    /// e.g. `Option<T>`, `Box<T>`, `&T`, `Weak<T>`
    Pointer(PointerDef),

    /// Ordered list of homogeneous values, fixed size or not
    ///
    /// e.g. `Vec<T>`, `[T; 3]`, `BTreeSet<T>`
    List(ListDef),

    /// Map with string-convertible keys and homogeneous values
    ///
    /// e.g. `HashMap<String, T>`
    Map(MapDef),

    /// Composite with named members, produced by `#[derive(Reflect)]`
    Struct(StructType),
}

impl fmt::Debug for Def {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Def::Scalar(ty) => write!(f, "Scalar({ty:?})"),
            Def::Pointer(ptr) => write!(f, "Pointer<{:?}, {}>", ptr.kind, ptr.pointee),
            Def::List(list) => write!(f, "List<{:?}, {}>", list.kind, list.item),
            Def::Map(map) => write!(f, "Map<{}, {}>", map.key, map.value),
            Def::Struct(st) => {
                let mut list = f.debug_list();
                for member in st.members {
                    list.entry(&format_args!("{}: {:?}", member.name, member.kind));
                }
                list.finish()
            }
        }
    }
}

/// Describes a pointer and the shape it points at.
#[derive(Clone, Copy, Debug)]
pub struct PointerDef {
    /// What sort of pointer this is
    pub kind: PointerKind,

    /// Shape of the pointee
    pub pointee: &'static Shape,
}

impl PointerDef {
    /// Construct a `PointerDef` from its kind and pointee shape.
    pub const fn new(kind: PointerKind, pointee: &'static Shape) -> Self {
        Self { kind, pointee }
    }

    /// Whether a value of this pointer type can be absent at runtime.
    pub const fn may_be_absent(&self) -> bool {
        matches!(
            self.kind,
            PointerKind::Option | PointerKind::RcWeak | PointerKind::ArcWeak
        )
    }
}

/// Known pointer kinds
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PointerKind {
    /// `Option<T>`
    Option,
    /// `Box<T>`, heap-allocated
    Box,
    /// `Rc<T>`, reference-counted
    Rc,
    /// `Arc<T>`, atomically reference-counted
    Arc,
    /// `rc::Weak<T>`, absent once every `Rc` is gone
    RcWeak,
    /// `sync::Weak<T>`, absent once every `Arc` is gone
    ArcWeak,
    /// `&T`
    Reference,
    /// `&mut T`
    MutReference,
}

/// Fields for list-like types
#[derive(Clone, Copy, Debug)]
pub struct ListDef {
    /// What sort of list this is
    pub kind: ListKind,

    /// Shape of the items
    pub item: &'static Shape,
}

impl ListDef {
    /// Construct a `ListDef` from its kind and item shape.
    pub const fn new(kind: ListKind, item: &'static Shape) -> Self {
        Self { kind, item }
    }
}

/// Known list kinds
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ListKind {
    /// `[T; N]`, carrying `N`
    Array(usize),
    /// `[T]`
    Slice,
    /// `Vec<T>`
    Vec,
    /// `VecDeque<T>`
    VecDeque,
    /// `LinkedList<T>`
    LinkedList,
    /// `BTreeSet<T>`, `HashSet<T>`, `IndexSet<T>`
    Set,
}

/// Fields for map types
#[derive(Clone, Copy, Debug)]
pub struct MapDef {
    /// What sort of map this is
    pub kind: MapKind,

    /// Shape of the keys
    pub key: &'static Shape,

    /// Shape of the values
    pub value: &'static Shape,
}

impl MapDef {
    /// Construct a `MapDef` from its kind and key/value shapes.
    pub const fn new(kind: MapKind, key: &'static Shape, value: &'static Shape) -> Self {
        Self { kind, key, value }
    }
}

/// Known map kinds
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MapKind {
    /// `HashMap<K, V>`: unspecified iteration order
    Hash,
    /// `BTreeMap<K, V>`: sorted by key
    BTree,
    /// `IndexMap<K, V>`: insertion order
    Index,
}
