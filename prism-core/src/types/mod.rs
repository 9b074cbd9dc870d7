use core::fmt;

mod def;
pub use def::*;

mod scalar;
pub use scalar::*;

mod struct_;
pub use struct_::*;

mod layout;
pub use layout::*;

/// Shorthand for the indirect shape getters used where cycles are possible.
pub type ShapeFn = fn() -> &'static Shape;

/// Schema for a reflected type: its name, its doc comments, and how it is
/// put together.
///
/// Shapes are built in const context and live in static memory; every
/// [`crate::Reflect`] type hands out exactly one through `Reflect::SHAPE`.
#[derive(Clone, Copy, Debug)]
pub struct Shape {
    /// Bare identifier of the type, without generic parameters (`"Vec"`, `"u32"`, `"Point"`)
    pub type_identifier: &'static str,

    /// Doc comment lines, as captured by the derive
    pub doc: &'static [&'static str],

    /// Structural definition
    pub def: Def,
}

impl Shape {
    /// Creates a shape with no doc comments.
    pub const fn new(type_identifier: &'static str, def: Def) -> Self {
        Self {
            type_identifier,
            doc: &[],
            def,
        }
    }

    /// Attaches doc comment lines.
    pub const fn with_doc(mut self, doc: &'static [&'static str]) -> Self {
        self.doc = doc;
        self
    }

    /// The structural category this shape is traversed as.
    pub const fn category(&self) -> Category {
        match self.def {
            Def::Scalar(_) => Category::Scalar,
            Def::Pointer(_) => Category::OptionalReference,
            Def::List(_) => Category::Sequence,
            Def::Map(_) => Category::Map,
            Def::Struct(_) => Category::Composite,
        }
    }

    /// Returns the struct definition, if this shape is a composite.
    pub const fn as_struct(&self) -> Option<&StructType> {
        match &self.def {
            Def::Struct(st) => Some(st),
            _ => None,
        }
    }

    /// Follows pointer definitions until reaching a non-pointer shape.
    pub const fn innermost(&'static self) -> &'static Shape {
        let mut shape = self;
        while let Def::Pointer(ptr) = shape.def {
            shape = ptr.pointee;
        }
        shape
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.def {
            Def::Pointer(ptr) => match ptr.kind {
                PointerKind::Reference => write!(f, "&{}", ptr.pointee),
                PointerKind::MutReference => write!(f, "&mut {}", ptr.pointee),
                _ => write!(f, "{}<{}>", self.type_identifier, ptr.pointee),
            },
            Def::List(list) => match list.kind {
                ListKind::Array(n) => write!(f, "[{}; {}]", list.item, n),
                ListKind::Slice => write!(f, "[{}]", list.item),
                _ => write!(f, "{}<{}>", self.type_identifier, list.item),
            },
            Def::Map(map) => write!(f, "{}<{}, {}>", self.type_identifier, map.key, map.value),
            Def::Scalar(_) | Def::Struct(_) => f.write_str(self.type_identifier),
        }
    }
}

/// The closed set of structural categories a value can fall into.
///
/// Every shape belongs to exactly one of these; traversal picks its strategy
/// from it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Category {
    /// Leaf value, handed to the renderer as-is
    Scalar,

    /// Something that may or may not point at a value (`Option`, `Box`, `Weak`, `&T`, ...)
    OptionalReference,

    /// Ordered run of homogeneous elements
    Sequence,

    /// String-keyed associative container
    Map,

    /// Record with named members
    Composite,
}
