use std::collections::{BTreeMap, HashMap};

use prism::{ByteBuf, Reflect};
use prism_bson::{BsonRenderError, RenderOptions, to_vec, to_vec_array, to_vec_with_options};
use prism_render::RenderError;
use prism_testhelpers::test;

/// Builds expected documents element by element.
#[derive(Default)]
struct Doc(Vec<u8>);

impl Doc {
    fn element(mut self, tag: u8, key: &str, payload: &[u8]) -> Self {
        self.0.push(tag);
        self.0.extend_from_slice(key.as_bytes());
        self.0.push(0);
        self.0.extend_from_slice(payload);
        self
    }

    fn int32(self, key: &str, v: i32) -> Self {
        self.element(0x10, key, &v.to_le_bytes())
    }

    fn int64(self, key: &str, v: i64) -> Self {
        self.element(0x12, key, &v.to_le_bytes())
    }

    fn double(self, key: &str, v: f64) -> Self {
        self.element(0x01, key, &v.to_le_bytes())
    }

    fn string(self, key: &str, v: &str) -> Self {
        let mut payload = ((v.len() + 1) as i32).to_le_bytes().to_vec();
        payload.extend_from_slice(v.as_bytes());
        payload.push(0);
        self.element(0x02, key, &payload)
    }

    fn document(self, key: &str, doc: Doc) -> Self {
        self.element(0x03, key, &doc.finish())
    }

    fn array(self, key: &str, doc: Doc) -> Self {
        self.element(0x04, key, &doc.finish())
    }

    fn finish(self) -> Vec<u8> {
        let len = (self.0.len() + 5) as i32;
        let mut out = len.to_le_bytes().to_vec();
        out.extend_from_slice(&self.0);
        out.push(0);
        out
    }
}

static ONE: i32 = 1;

#[derive(Reflect)]
#[reflect(shared(name = "a", path = ONE))]
struct Shared {
    b: f64,
}

#[derive(Reflect)]
struct Holder {
    c: [i32; 3],
}

#[derive(Reflect)]
struct Base {
    id: u64,
}

#[derive(Reflect)]
struct Nested {
    #[reflect(base)]
    base: Base,
    name: &'static str,
}

#[derive(Reflect)]
struct Flat {
    #[reflect(base_inline)]
    base: Base,
    name: &'static str,
}

#[derive(Reflect)]
struct Kinds {
    small: u16,
    wide: u32,
    big: i128,
    letter: char,
    flag: bool,
    ratio: f32,
    blob: ByteBuf,
    nothing: Option<u8>,
}

#[derive(Reflect)]
struct Unsigned {
    n: u64,
}

#[test]
fn shared_member_and_double() {
    let value = Shared { b: 2.0 };
    let expected = Doc::default().int32("a", 1).double("b", 2.0).finish();
    assert_eq!(to_vec(&value).unwrap(), expected);
}

#[test]
fn fixed_array_member() {
    let value = Holder { c: [8, 9, 10] };
    let array = Doc::default().int32("0", 8).int32("1", 9).int32("2", 10);
    let expected = Doc::default().array("c", array).finish();
    assert_eq!(to_vec(&value).unwrap(), expected);
}

#[test]
fn map_entries() {
    let map = HashMap::from([("item1".to_string(), 6), ("item2".to_string(), 7)]);
    let bytes = to_vec_with_options(&map, &RenderOptions::new().sorted_maps()).unwrap();
    let expected = Doc::default().int32("item1", 6).int32("item2", 7).finish();
    assert_eq!(bytes, expected);
}

#[test]
fn base_nests_base_inline_flattens() {
    let nested = Nested {
        base: Base { id: 7 },
        name: "n",
    };
    let expected = Doc::default()
        .document("Base", Doc::default().int64("id", 7))
        .string("name", "n")
        .finish();
    assert_eq!(to_vec(&nested).unwrap(), expected);

    let flat = Flat {
        base: Base { id: 7 },
        name: "n",
    };
    let expected = Doc::default().int64("id", 7).string("name", "n").finish();
    assert_eq!(to_vec(&flat).unwrap(), expected);
}

#[test]
fn scalar_type_mapping() {
    let value = Kinds {
        small: 5,
        wide: 6,
        big: -1,
        letter: 'z',
        flag: false,
        ratio: 0.5,
        blob: ByteBuf::from(vec![1, 2]),
        nothing: None,
    };
    let expected = Doc::default()
        .int32("small", 5)
        .int64("wide", 6)
        .string("big", "-1")
        .string("letter", "z")
        .element(0x08, "flag", &[0])
        .double("ratio", 0.5)
        .element(0x05, "blob", &[2, 0, 0, 0, 0x00, 1, 2]);
    assert_eq!(to_vec(&value).unwrap(), expected.finish());

    let with_null = Doc::default()
        .int32("small", 5)
        .int64("wide", 6)
        .string("big", "-1")
        .string("letter", "z")
        .element(0x08, "flag", &[0])
        .double("ratio", 0.5)
        .element(0x05, "blob", &[2, 0, 0, 0, 0x00, 1, 2])
        .element(0x0A, "nothing", &[]);
    assert_eq!(
        to_vec_with_options(&value, &RenderOptions::new().absent_as_null()).unwrap(),
        with_null.finish()
    );
}

#[test]
fn array_roots_are_keyed_by_position() {
    let expected = Doc::default().string("0", "a").string("1", "b").finish();
    assert_eq!(to_vec_array(&["a", "b"]).unwrap(), expected);
}

#[test]
fn skipped_elements_do_not_leave_gaps_in_array_keys() {
    let values = vec![Some(1u8), None, Some(3)];
    let expected = Doc::default().int32("0", 1).int32("1", 3).finish();
    assert_eq!(to_vec_array(&values).unwrap(), expected);
}

#[test]
fn absent_roots_are_empty_documents() {
    let none: Option<Base> = None;
    assert_eq!(to_vec(&none).unwrap(), Doc::default().finish());
}

#[test]
fn u64_beyond_int64_is_an_error() {
    let err = to_vec(&Unsigned { n: u64::MAX }).unwrap_err();
    assert!(matches!(
        err,
        RenderError::Backend(BsonRenderError::IntegerOverflow(u64::MAX))
    ));

    let fits = to_vec(&Unsigned { n: i64::MAX as u64 }).unwrap();
    assert_eq!(fits, Doc::default().int64("n", i64::MAX).finish());
}

#[test]
fn keys_with_nul_are_an_error() {
    let map = BTreeMap::from([("bad\0key", 1)]);
    let err = to_vec(&map).unwrap_err();
    assert_eq!(
        err.backend(),
        Some(&BsonRenderError::KeyContainsNul("bad\0key".to_string()))
    );
}
