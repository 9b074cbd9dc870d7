use alloc::{rc::Rc, sync::Arc};

use crate::{DynReflect, PointerKind};

/// A view of a pointer that may not hold a value.
pub struct PeekPointer<'a> {
    /// What sort of pointer this is
    pub kind: PointerKind,
    target: Option<Pointee<'a>>,
}

/// How a present pointee is held.
///
/// Weak pointers have to be upgraded to be read, so their pointee is kept
/// alive by a strong handle for as long as the view exists.
pub enum Pointee<'a> {
    /// Borrowed straight out of the pointer
    Borrowed(&'a dyn DynReflect),
    /// Upgraded from an `rc::Weak`
    Rc(Rc<dyn DynReflect + 'a>),
    /// Upgraded from a `sync::Weak`
    Arc(Arc<dyn DynReflect + 'a>),
}

impl<'a> PeekPointer<'a> {
    /// A pointer whose pointee, if any, can be borrowed directly.
    pub fn borrowed(kind: PointerKind, target: Option<&'a dyn DynReflect>) -> Self {
        Self {
            kind,
            target: target.map(Pointee::Borrowed),
        }
    }

    /// A pointer whose pointee was obtained by upgrading an `rc::Weak`.
    pub fn rc<T: DynReflect + 'a>(kind: PointerKind, target: Option<Rc<T>>) -> Self {
        Self {
            kind,
            target: target.map(|rc| Pointee::Rc(rc as Rc<dyn DynReflect + 'a>)),
        }
    }

    /// A pointer whose pointee was obtained by upgrading a `sync::Weak`.
    pub fn arc<T: DynReflect + 'a>(kind: PointerKind, target: Option<Arc<T>>) -> Self {
        Self {
            kind,
            target: target.map(|arc| Pointee::Arc(arc as Arc<dyn DynReflect + 'a>)),
        }
    }

    /// Whether the pointer currently holds a value.
    pub fn is_present(&self) -> bool {
        self.target.is_some()
    }

    /// The pointee, or `None` when absent.
    pub fn pointee(&self) -> Option<&dyn DynReflect> {
        match self.target.as_ref()? {
            Pointee::Borrowed(value) => Some(*value),
            Pointee::Rc(rc) => Some(&**rc),
            Pointee::Arc(arc) => Some(&**arc),
        }
    }
}
