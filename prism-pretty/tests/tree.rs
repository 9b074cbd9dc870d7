use std::collections::BTreeMap;

use insta::assert_snapshot;
use prism::{ByteBuf, Reflect};
use prism_pretty::{RenderOptions, to_string, to_string_with_options};
use prism_testhelpers::test;

static ONE: i32 = 1;

#[derive(Reflect)]
#[reflect(shared(name = "a", path = ONE))]
struct Shared {
    b: f64,
}

#[derive(Reflect)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Reflect)]
struct Figure {
    #[reflect(base)]
    origin: Point,
    #[reflect(base_inline)]
    extent: Point,
    label: char,
    points: [u8; 3],
    attrs: BTreeMap<String, ByteBuf>,
    parent: Option<Box<Figure>>,
}

#[test]
fn shared_member_and_double() {
    assert_snapshot!(to_string(&Shared { b: 2.0 }).unwrap(), @r"
    {
      a: 1
      b: 2.0
    }
    ");
}

#[test]
fn nested_tree() {
    let figure = Figure {
        origin: Point { x: 0, y: 1 },
        extent: Point { x: 4, y: 5 },
        label: 'q',
        points: [8, 9, 10],
        attrs: BTreeMap::from([("raw".to_string(), ByteBuf::from(vec![0xff, 0x01]))]),
        parent: None,
    };
    assert_snapshot!(to_string(&figure).unwrap(), @r#"
    {
      Point: {
        x: 0
        y: 1
      }
      x: 4
      y: 5
      label: 'q'
      points: [
        [0]: 8
        [1]: 9
        [2]: 10
      ]
      attrs: {
        raw: b"\xff\x01"
      }
      parent: <absent>
    }
    "#);
}

#[test]
fn skipping_absent_values_and_custom_indent() {
    let values = vec![Some(1u8), None, Some(3)];
    let options = RenderOptions::new().skip_absent().indent("\t");
    assert_eq!(
        to_string_with_options(&values, &options).unwrap(),
        "[\n\t[0]: 1\n\t[2]: 3\n]"
    );
}

#[test]
fn empty_containers_and_roots() {
    assert_eq!(to_string(&Vec::<u8>::new()).unwrap(), "[]");
    assert_eq!(to_string(&BTreeMap::<String, u8>::new()).unwrap(), "{}");
    assert_eq!(to_string(&None::<u8>).unwrap(), "<absent>");
    assert_eq!(to_string("hi").unwrap(), "\"hi\"");
}

#[test]
fn colors_wrap_tokens_in_escape_codes() {
    let plain = to_string(&Point { x: 1, y: 2 }).unwrap();
    let colored =
        to_string_with_options(&Point { x: 1, y: 2 }, &RenderOptions::new().colors(true)).unwrap();
    assert!(!plain.contains('\x1b'));
    assert!(colored.contains('\x1b'));
    assert!(colored.contains("\x1b[36mx\x1b[39m"));
}
