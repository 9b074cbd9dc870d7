use alloc::{
    collections::{LinkedList, VecDeque},
    vec::Vec,
};

use crate::{ArrayLayout, Def, DynReflect, ListDef, ListKind, Peek, PeekList, Reflect, Shape};

macro_rules! impl_list {
    ($ty:ident, $kind:ident) => {
        impl<T: Reflect> Reflect for $ty<T> {
            const SHAPE: &'static Shape = &const {
                Shape::new(
                    stringify!($ty),
                    Def::List(ListDef::new(ListKind::$kind, T::SHAPE)),
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
    };
}

impl_list!(Vec, Vec);
impl_list!(VecDeque, VecDeque);
impl_list!(LinkedList, LinkedList);
