use alloc::sync::{Arc, Weak};

use crate::{Def, Peek, PeekPointer, PointerDef, PointerKind, Reflect, Shape};

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    const SHAPE: &'static Shape =
        &const { Shape::new("Arc", Def::Pointer(PointerDef::new(PointerKind::Arc, T::SHAPE))) };
    type Layout = T::Layout;

    #[inline]
    fn peek(&self) -> Peek<'_> {
        (**self).peek()
    }
}

impl<T: Reflect> Reflect for Weak<T> {
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "Weak",
            Def::Pointer(PointerDef::new(PointerKind::ArcWeak, T::SHAPE)),
        )
    };
    type Layout = T::Layout;

    fn peek(&self) -> Peek<'_> {
        Peek::Pointer(PeekPointer::arc(PointerKind::ArcWeak, self.upgrade()))
    }
}
