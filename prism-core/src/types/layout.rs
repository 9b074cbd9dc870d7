//! Type-level output layouts.
//!
//! Each [`crate::Reflect`] type names the layout it produces once rendered,
//! which lets entry points such as `render_object` refuse the wrong kind of
//! root at compile time.

mod sealed {
    pub trait Sealed {}
}

/// The output-level shape of a type: a bare value, an array, or an object.
pub trait Layout: sealed::Sealed + 'static {
    /// Runtime mirror of the marker
    const KIND: LayoutKind;
}

/// Runtime mirror of the [`Layout`] markers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LayoutKind {
    /// A bare value
    Scalar,
    /// An ordered run of values
    Array,
    /// Named entries
    Object,
}

/// Renders as a bare value.
pub enum ScalarLayout {}

/// Renders as an array.
pub enum ArrayLayout {}

/// Renders as an object.
pub enum ObjectLayout {}

impl sealed::Sealed for ScalarLayout {}
impl sealed::Sealed for ArrayLayout {}
impl sealed::Sealed for ObjectLayout {}

impl Layout for ScalarLayout {
    const KIND: LayoutKind = LayoutKind::Scalar;
}

impl Layout for ArrayLayout {
    const KIND: LayoutKind = LayoutKind::Array;
}

impl Layout for ObjectLayout {
    const KIND: LayoutKind = LayoutKind::Object;
}
