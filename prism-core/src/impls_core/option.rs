use crate::{Def, DynReflect, Peek, PeekPointer, PointerDef, PointerKind, Reflect, Shape};

impl<T: Reflect> Reflect for Option<T> {
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "Option",
            Def::Pointer(PointerDef::new(PointerKind::Option, T::SHAPE)),
        )
    };
    type Layout = T::Layout;

    fn peek(&self) -> Peek<'_> {
        Peek::Pointer(PeekPointer::borrowed(
            PointerKind::Option,
            self.as_ref().map(|v| v as &dyn DynReflect),
        ))
    }
}
