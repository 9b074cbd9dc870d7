use alloc::boxed::Box;

use crate::{Def, Peek, PointerDef, PointerKind, Reflect, Shape};

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "Box",
            Def::Pointer(PointerDef::new(PointerKind::Box, T::SHAPE)),
        )
    };
    type Layout = T::Layout;

    #[inline]
    fn peek(&self) -> Peek<'_> {
        (**self).peek()
    }
}
