use crate::{ArrayLayout, Def, DynReflect, ListDef, ListKind, Peek, PeekList, Reflect, Shape};

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    const SHAPE: &'static Shape = &const {
        Shape::new("Array", Def::List(ListDef::new(ListKind::Array(N), T::SHAPE)))
    };
    type Layout = ArrayLayout;

    fn peek(&self) -> Peek<'_> {
        Peek::List(PeekList::new(
            N,
            self.iter().map(|item| item as &dyn DynReflect),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PeekScalar, ScalarValue};
    use prism_testhelpers::test;

    #[test]
    fn fixed_array_yields_in_order() {
        let values = [8i32, 9, 10];
        let Peek::List(list) = values.peek() else {
            panic!("arrays peek as lists");
        };
        assert_eq!(list.len(), 3);
        let seen: Vec<_> = list
            .map(|item| match item.dyn_peek() {
                Peek::Scalar(PeekScalar { value, .. }) => value,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            seen,
            [ScalarValue::I64(8), ScalarValue::I64(9), ScalarValue::I64(10)]
        );
    }

    #[test]
    fn array_shape_display() {
        assert_eq!(<[u8; 4] as Reflect>::SHAPE.to_string(), "[u8; 4]");
    }
}
