use std::collections::BTreeMap;

use prism::{
    Category, Def, LayoutKind, MemberKind, Peek, PeekScalar, Reflect, ScalarValue, StructKind,
};
use prism_testhelpers::test;

#[derive(Reflect)]
struct Base {
    id: u32,
}

/// Inherits from [`Base`] twice over.
#[derive(Reflect)]
#[reflect(rename = "Child")]
struct Derived {
    #[reflect(base_inline)]
    inline: Base,
    /// The nested copy.
    #[reflect(base)]
    nested: Base,
    #[reflect(rename = "label")]
    name: String,
    #[reflect(skip)]
    #[allow(dead_code)]
    cache: Vec<u8>,
}

static ANSWER: u32 = 42;

/// Only `ratio` lives in the value; `answer` and `enabled` belong to the type.
#[derive(Reflect)]
#[reflect(shared(name = "answer", path = ANSWER))]
#[reflect(constant(name = "enabled", value = Self::ENABLED))]
struct WithShared {
    ratio: f64,
}

impl WithShared {
    const ENABLED: bool = true;
}

#[derive(Reflect)]
struct Pair(u8, pub String);

#[derive(Reflect)]
struct Marker;

#[derive(Reflect)]
struct Generic<'a, T, const N: usize>
where
    T: Clone,
{
    items: [T; N],
    name: &'a str,
    lookup: BTreeMap<String, Option<T>>,
}

#[derive(Reflect)]
struct Tree {
    value: i32,
    children: Vec<Tree>,
}

fn member_names<T: Reflect>() -> Vec<&'static str> {
    T::SHAPE
        .as_struct()
        .map(|st| st.members.iter().map(|m| m.name).collect())
        .unwrap_or_default()
}

#[test]
fn members_follow_declaration_order() {
    assert_eq!(member_names::<Derived>(), ["inline", "Base", "label"]);
    let st = Derived::SHAPE.as_struct().expect("composite");
    let kinds: Vec<_> = st.members.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        [MemberKind::BaseInline, MemberKind::Base, MemberKind::Value]
    );
    assert_eq!(st.kind, StructKind::Struct);
}

#[test]
fn container_rename_and_docs() {
    assert_eq!(Derived::SHAPE.type_identifier, "Child");
    assert_eq!(Derived::SHAPE.doc, &[" Inherits from [`Base`] twice over."]);
    let st = Derived::SHAPE.as_struct().expect("composite");
    assert_eq!(st.member(1).map(|m| m.doc), Some(&[" The nested copy."][..]));
}

#[test]
fn flat_members_splice_inline_bases_only() {
    let st = Derived::SHAPE.as_struct().expect("composite");
    let flat: Vec<_> = st.flat_members().iter().map(|m| m.name).collect();
    assert_eq!(flat, ["id", "Base", "label"]);
}

#[test]
fn shared_and_constant_members() {
    let st = WithShared::SHAPE.as_struct().expect("composite");
    let members: Vec<_> = st.members.iter().map(|m| (m.name, m.kind)).collect();
    assert_eq!(
        members,
        [
            ("answer", MemberKind::Ref),
            ("enabled", MemberKind::Const),
            ("ratio", MemberKind::Value)
        ]
    );
    assert_eq!(st.members[0].shape().to_string(), "u32");
    assert_eq!(st.members[1].shape().to_string(), "bool");
    assert_eq!(size_of::<WithShared>(), size_of::<f64>());

    let first = WithShared { ratio: 1.0 };
    let second = WithShared { ratio: 2.0 };
    for value in [&first, &second] {
        let Peek::Struct(peek) = value.peek() else {
            panic!("derived structs peek as structs");
        };
        let (_, answer) = peek.member(0).expect("answer");
        assert!(std::ptr::addr_eq(answer, &ANSWER));
        let Peek::Scalar(PeekScalar { value, .. }) = answer.dyn_peek() else {
            panic!("u32 peeks as a scalar");
        };
        assert_eq!(value, ScalarValue::U64(42));

        let (_, enabled) = peek.member(1).expect("enabled");
        let Peek::Scalar(PeekScalar { value, .. }) = enabled.dyn_peek() else {
            panic!("bool peeks as a scalar");
        };
        assert_eq!(value, ScalarValue::Bool(true));
    }
}

#[test]
fn tuple_and_unit_structs() {
    assert_eq!(member_names::<Pair>(), ["0", "1"]);
    assert_eq!(
        Pair::SHAPE.as_struct().map(|st| st.kind),
        Some(StructKind::TupleStruct)
    );
    assert!(member_names::<Marker>().is_empty());
    assert_eq!(Marker::SHAPE.category(), Category::Composite);

    let pair = Pair(1, "one".into());
    let Peek::Struct(peek) = pair.peek() else {
        panic!("derived structs peek as structs");
    };
    assert_eq!(peek.len(), 2);
    assert!(peek.member(2).is_none());
}

#[test]
fn generic_structs() {
    type G = Generic<'static, u16, 2>;
    assert_eq!(member_names::<G>(), ["items", "name", "lookup"]);
    let st = G::SHAPE.as_struct().expect("composite");
    assert_eq!(st.members[0].shape().to_string(), "[u16; 2]");
    assert_eq!(
        st.members[2].shape().to_string(),
        "BTreeMap<String, Option<u16>>"
    );
    assert_eq!(
        <<G as Reflect>::Layout as prism::Layout>::KIND,
        LayoutKind::Object
    );

    let value: G = Generic {
        items: [1, 2],
        name: "g",
        lookup: BTreeMap::new(),
    };
    assert!(matches!(value.peek(), Peek::Struct(_)));
}

#[test]
fn recursive_structs() {
    let st = Tree::SHAPE.as_struct().expect("composite");
    let children = st.member_named("children").expect("children").shape();
    let Def::List(list) = children.def else {
        panic!("Vec<Tree> is a list");
    };
    assert_eq!(list.item.type_identifier, "Tree");

    let tree = Tree {
        value: 1,
        children: vec![Tree {
            value: 2,
            children: Vec::new(),
        }],
    };
    let Peek::Struct(peek) = tree.peek() else {
        panic!("derived structs peek as structs");
    };
    assert_eq!(peek.iter().count(), 2);
}
