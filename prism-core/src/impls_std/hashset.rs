use std::collections::HashSet;
use std::hash::BuildHasher;

use crate::{ArrayLayout, Def, DynReflect, ListDef, ListKind, Peek, PeekList, Reflect, Shape};

impl<T, S> Reflect for HashSet<T, S>
where
    T: Reflect,
    S: BuildHasher,
{
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "HashSet",
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
