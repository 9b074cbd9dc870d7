use crate::{Layout, ObjectLayout, Peek, Shape};

/// Allows walking a value's structure without knowing its concrete type.
///
/// Implement it with `#[derive(Reflect)]` for your own structs; the std impls
/// cover scalars, pointers, sequences and maps.
pub trait Reflect {
    /// The shape of this type.
    const SHAPE: &'static Shape;

    /// What this type looks like once rendered.
    ///
    /// Pointers forward their pointee's layout, sequences are arrays, maps
    /// and structs are objects.
    type Layout: Layout;

    /// A read-only view of `self`, classified by structural category.
    fn peek(&self) -> Peek<'_>;
}

/// Object-safe mirror of [`Reflect`], used wherever values of different
/// types sit side by side (struct members, list elements, map values).
///
/// Implemented for every sized [`Reflect`] type.
pub trait DynReflect {
    /// The shape of the underlying type.
    fn dyn_shape(&self) -> &'static Shape;

    /// Same as [`Reflect::peek`].
    fn dyn_peek(&self) -> Peek<'_>;
}

impl<T: Reflect> DynReflect for T {
    #[inline]
    fn dyn_shape(&self) -> &'static Shape {
        T::SHAPE
    }

    #[inline]
    fn dyn_peek(&self) -> Peek<'_> {
        self.peek()
    }
}

impl core::fmt::Debug for dyn DynReflect + '_ {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "<{}>", self.dyn_shape())
    }
}

/// Member accessor generated by `#[derive(Reflect)]`.
pub trait Members {
    /// Value of the member at `index`, in declaration order.
    fn member(&self, index: usize) -> Option<&dyn DynReflect>;
}

/// Returns the shape of `T`.
///
/// Usable as a [`crate::ShapeFn`], which is how member descriptors refer to
/// their type.
#[inline]
pub const fn shape_of<T: Reflect + ?Sized>() -> &'static Shape {
    T::SHAPE
}

/// Returns the shape of the value's type.
///
/// Lets the derive describe a registered static or constant without naming
/// its type.
#[inline]
pub fn shape_of_val<T: Reflect + ?Sized>(_: &T) -> &'static Shape {
    T::SHAPE
}

/// Fails to compile unless `T` renders as an object. Used by the derive on
/// `base` and `base_inline` members.
#[doc(hidden)]
#[inline(always)]
pub const fn assert_object_layout<T: Reflect<Layout = ObjectLayout> + ?Sized>() {}
