use alloc::rc::{Rc, Weak};

use crate::{Def, Peek, PeekPointer, PointerDef, PointerKind, Reflect, Shape};

impl<T: Reflect + ?Sized> Reflect for Rc<T> {
    const SHAPE: &'static Shape =
        &const { Shape::new("Rc", Def::Pointer(PointerDef::new(PointerKind::Rc, T::SHAPE))) };
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
            Def::Pointer(PointerDef::new(PointerKind::RcWeak, T::SHAPE)),
        )
    };
    type Layout = T::Layout;

    fn peek(&self) -> Peek<'_> {
        Peek::Pointer(PeekPointer::rc(PointerKind::RcWeak, self.upgrade()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PeekScalar, ScalarValue};
    use prism_testhelpers::test;

    #[test]
    fn rc_is_transparent() {
        let value = Rc::new(3u16);
        assert!(matches!(value.peek(), Peek::Scalar(_)));
        assert_eq!(<Rc<u16> as Reflect>::SHAPE.to_string(), "Rc<u16>");
    }

    #[test]
    fn weak_goes_absent_when_dropped() {
        let strong = Rc::new(String::from("alive"));
        let weak = Rc::downgrade(&strong);

        {
            let Peek::Pointer(ptr) = weak.peek() else {
                panic!("Weak should peek as a pointer");
            };
            let Some(target) = ptr.pointee() else {
                panic!("pointee should still be alive");
            };
            let Peek::Scalar(PeekScalar { value, .. }) = target.dyn_peek() else {
                panic!("String should peek as a scalar");
            };
            assert_eq!(value, ScalarValue::Str("alive".into()));
        }

        drop(strong);
        let Peek::Pointer(ptr) = weak.peek() else {
            panic!("Weak should peek as a pointer");
        };
        assert!(!ptr.is_present());
    }
}
