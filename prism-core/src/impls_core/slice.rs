use crate::{ArrayLayout, Def, DynReflect, ListDef, ListKind, Peek, PeekList, Reflect, Shape};

impl<T: Reflect> Reflect for [T] {
    const SHAPE: &'static Shape =
        &const { Shape::new("Slice", Def::List(ListDef::new(ListKind::Slice, T::SHAPE))) };
    type Layout = ArrayLayout;

    fn peek(&self) -> Peek<'_> {
        Peek::List(PeekList::new(
            self.len(),
            self.iter().map(|item| item as &dyn DynReflect),
        ))
    }
}
