//! Runtime views over reflected values.
//!
//! A [`Peek`] is what [`crate::Reflect::peek`] returns: a borrowed, read-only
//! view of one value, already classified into its structural category.

use alloc::borrow::Cow;

use crate::{ScalarType, ScalarValue};

mod pointer;
pub use pointer::*;

mod list;
pub use list::*;

mod map;
pub use map::*;

mod struct_;
pub use struct_::*;

/// A read-only view of a value, by structural category.
pub enum Peek<'a> {
    /// A leaf value
    Scalar(PeekScalar<'a>),

    /// A pointer that may be absent (`Option`, `Weak`)
    ///
    /// Pointers that always hold a value (`Box`, `Rc`, `&T`) never show up
    /// here: they peek as their pointee.
    Pointer(PeekPointer<'a>),

    /// A sequence
    List(PeekList<'a>),

    /// A map
    Map(PeekMap<'a>),

    /// A composite
    Struct(PeekStruct<'a>),
}

impl Peek<'_> {
    /// Short name of the variant, for logs and error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Peek::Scalar(_) => "scalar",
            Peek::Pointer(_) => "pointer",
            Peek::List(_) => "list",
            Peek::Map(_) => "map",
            Peek::Struct(_) => "struct",
        }
    }
}

impl core::fmt::Debug for Peek<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Peek::Scalar(s) => write!(f, "Peek::Scalar({:?})", s.value),
            Peek::Pointer(p) => {
                write!(f, "Peek::Pointer({:?}, present: {})", p.kind, p.is_present())
            }
            Peek::List(l) => write!(f, "Peek::List(len: {})", l.len()),
            Peek::Map(m) => write!(f, "Peek::Map(len: {})", m.len()),
            Peek::Struct(s) => write!(f, "Peek::Struct({})", s.shape()),
        }
    }
}

/// A scalar value together with the exact type it came from.
#[derive(Clone, PartialEq, Debug)]
pub struct PeekScalar<'a> {
    /// Originating type
    pub ty: ScalarType,
    /// Widened value
    pub value: ScalarValue<'a>,
}

impl<'a> PeekScalar<'a> {
    /// Pairs a value with its originating type.
    pub const fn new(ty: ScalarType, value: ScalarValue<'a>) -> Self {
        Self { ty, value }
    }

    /// The explicit null marker renderers emit for absent values.
    pub const fn null() -> Self {
        Self::new(ScalarType::Unit, ScalarValue::Null)
    }

    /// Borrowed text scalar.
    pub const fn str(ty: ScalarType, s: &'a str) -> Self {
        Self::new(ty, ScalarValue::Str(Cow::Borrowed(s)))
    }
}
