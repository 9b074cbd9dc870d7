use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::{
    Def, DynReflect, MapDef, MapKey, MapKind, ObjectLayout, Peek, PeekMap, Reflect, Shape,
};

impl<K, V, S> Reflect for HashMap<K, V, S>
where
    K: Reflect + MapKey,
    V: Reflect,
    S: BuildHasher,
{
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "HashMap",
            Def::Map(MapDef::new(MapKind::Hash, K::SHAPE, V::SHAPE)),
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
    use crate::{PeekScalar, ScalarValue};
    use prism_testhelpers::test;

    #[test]
    fn every_entry_is_visited_once() {
        let mut map = HashMap::new();
        map.insert(String::from("item1"), 6i32);
        map.insert(String::from("item2"), 7i32);

        let Peek::Map(entries) = map.peek() else {
            panic!("HashMap should peek as a map");
        };
        assert_eq!(entries.len(), 2);

        let mut seen: Vec<(String, ScalarValue<'_>)> = entries
            .map(|(k, v)| match v.dyn_peek() {
                Peek::Scalar(PeekScalar { value, .. }) => (k.into_owned(), value),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        seen.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            seen,
            [
                (String::from("item1"), ScalarValue::I64(6)),
                (String::from("item2"), ScalarValue::I64(7)),
            ]
        );
    }
}
