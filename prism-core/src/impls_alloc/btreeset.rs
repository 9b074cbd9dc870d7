use alloc::collections::BTreeSet;

use crate::{ArrayLayout, Def, DynReflect, ListDef, ListKind, Peek, PeekList, Reflect, Shape};

impl<T: Reflect> Reflect for BTreeSet<T> {
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "BTreeSet",
            Def::List(ListDef::new(ListKind::Set, T::SHAPE)),
        )
    };
    type Layout = ArrayLayout;

    fn peek(&self) -> Peek<'_> {
        Peek::List(PeekList::new(
            self.len(),
            self.iter().map(|item| item as &dyn DynReflect),
        ))
    }
}
