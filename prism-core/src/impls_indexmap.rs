use indexmap::{IndexMap, IndexSet};

use crate::{
    ArrayLayout, Def, DynReflect, ListDef, ListKind, MapDef, MapKey, MapKind, ObjectLayout, Peek,
    PeekList, PeekMap, Reflect, Shape,
};

impl<K, V, S> Reflect for IndexMap<K, V, S>
where
    K: Reflect + MapKey,
    V: Reflect,
{
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "IndexMap",
            Def::Map(MapDef::new(MapKind::Index, K::SHAPE, V::SHAPE)),
        )
    };
    type Layout = ObjectLayout;

    fn peek(&self) -> Peek<'_> {
        Peek::Map(PeekMap::new(
            self.len(),
            self.iter()
                .map(|(k, v)| (k.map_key(), v as &dyn DynReflect)),
        ))
    }
}

impl<T, S> Reflect for IndexSet<T, S>
where
    T: Reflect,
{
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "IndexSet",
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

#[cfg(test)]
mod tests {
    use super::*;
    use prism_testhelpers::test;

    #[test]
    fn insertion_order_is_kept() {
        let mut map: IndexMap<&str, u8> = IndexMap::new();
        map.insert("zeta", 1);
        map.insert("alpha", 2);

        let Peek::Map(entries) = map.peek() else {
            panic!("IndexMap should peek as a map");
        };
        let keys: Vec<_> = entries.map(|(k, _)| k.into_owned()).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }
}
