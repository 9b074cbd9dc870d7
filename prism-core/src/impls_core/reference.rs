use crate::{Def, Peek, PointerDef, PointerKind, Reflect, Shape};

// References always point somewhere: they peek as their pointee.

impl<T: Reflect + ?Sized> Reflect for &T {
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "&",
            Def::Pointer(PointerDef::new(PointerKind::Reference, T::SHAPE)),
        )
    };
    type Layout = T::Layout;

    #[inline]
    fn peek(&self) -> Peek<'_> {
        (**self).peek()
    }
}

impl<T: Reflect + ?Sized> Reflect for &mut T {
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "&mut",
            Def::Pointer(PointerDef::new(PointerKind::MutReference, T::SHAPE)),
        )
    };
    type Layout = T::Layout;

    #[inline]
    fn peek(&self) -> Peek<'_> {
        (**self).peek()
    }
}
