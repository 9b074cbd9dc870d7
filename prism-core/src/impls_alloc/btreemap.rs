use alloc::collections::BTreeMap;

use crate::{
    Def, DynReflect, MapDef, MapKey, MapKind, ObjectLayout, Peek, PeekMap, Reflect, Shape,
};

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Reflect + MapKey,
    V: Reflect,
{
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "BTreeMap",
            Def::Map(MapDef::new(MapKind::BTree, K::SHAPE, V::SHAPE)),
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

#[cfg(test)]
mod tests {
    use super::*;
    use prism_testhelpers::test;

    #[test]
    fn keys_come_out_sorted() {
        let mut map = BTreeMap::new();
        map.insert(2u32, "two");
        map.insert(10u32, "ten");
        map.insert(1u32, "one");

        let Peek::Map(entries) = map.peek() else {
            panic!("BTreeMap should peek as a map");
        };
        let keys: Vec<_> = entries.map(|(k, _)| k.into_owned()).collect();
        // numeric order, not lexicographic
        assert_eq!(keys, ["1", "2", "10"]);
    }

    #[test]
    fn shape_display() {
        assert_eq!(
            <BTreeMap<String, Vec<u8>> as Reflect>::SHAPE.to_string(),
            "BTreeMap<String, Vec<u8>>"
        );
    }
}
