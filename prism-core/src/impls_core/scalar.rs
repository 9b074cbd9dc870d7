use alloc::borrow::Cow;
use core::marker::PhantomData;

use crate::*;

macro_rules! impl_scalar {
    ($ty:ty, $name:literal, $scalar:ident, |$v:ident| $value:expr) => {
        impl Reflect for $ty {
            const SHAPE: &'static Shape =
                &const { Shape::new($name, Def::Scalar(ScalarType::$scalar)) };
            type Layout = ScalarLayout;

            #[inline]
            fn peek(&self) -> Peek<'_> {
                let $v = self;
                Peek::Scalar(PeekScalar::new(ScalarType::$scalar, $value))
            }
        }
    };
}

impl_scalar!(bool, "bool", Bool, |v| ScalarValue::Bool(*v));
impl_scalar!(char, "char", Char, |v| ScalarValue::Char(*v));
impl_scalar!(str, "str", Str, |v| ScalarValue::Str(Cow::Borrowed(v)));

impl_scalar!(f32, "f32", F32, |v| ScalarValue::F32(*v));
impl_scalar!(f64, "f64", F64, |v| ScalarValue::F64(*v));

impl_scalar!(u8, "u8", U8, |v| ScalarValue::U64(u64::from(*v)));
impl_scalar!(u16, "u16", U16, |v| ScalarValue::U64(u64::from(*v)));
impl_scalar!(u32, "u32", U32, |v| ScalarValue::U64(u64::from(*v)));
impl_scalar!(u64, "u64", U64, |v| ScalarValue::U64(*v));
impl_scalar!(usize, "usize", USize, |v| ScalarValue::U64(*v as u64));
impl_scalar!(u128, "u128", U128, |v| ScalarValue::U128(*v));

impl_scalar!(i8, "i8", I8, |v| ScalarValue::I64(i64::from(*v)));
impl_scalar!(i16, "i16", I16, |v| ScalarValue::I64(i64::from(*v)));
impl_scalar!(i32, "i32", I32, |v| ScalarValue::I64(i64::from(*v)));
impl_scalar!(i64, "i64", I64, |v| ScalarValue::I64(*v));
impl_scalar!(isize, "isize", ISize, |v| ScalarValue::I64(*v as i64));
impl_scalar!(i128, "i128", I128, |v| ScalarValue::I128(*v));

impl_scalar!((), "()", Unit, |_v| ScalarValue::Null);

impl<T: ?Sized> Reflect for PhantomData<T> {
    const SHAPE: &'static Shape =
        &const { Shape::new("PhantomData", Def::Scalar(ScalarType::Unit)) };
    type Layout = ScalarLayout;

    fn peek(&self) -> Peek<'_> {
        Peek::Scalar(PeekScalar::null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_testhelpers::test;

    fn scalar_of<T: Reflect + ?Sized>(value: &T) -> PeekScalar<'_> {
        match value.peek() {
            Peek::Scalar(s) => s,
            other => panic!("expected a scalar, got {other:?}"),
        }
    }

    #[test]
    fn integers_widen_but_keep_their_type() {
        let s = scalar_of(&7u8);
        assert_eq!(s.ty, ScalarType::U8);
        assert_eq!(s.value, ScalarValue::U64(7));

        let s = scalar_of(&-3i16);
        assert_eq!(s.ty, ScalarType::I16);
        assert_eq!(s.value, ScalarValue::I64(-3));

        let s = scalar_of(&u128::MAX);
        assert_eq!(s.value, ScalarValue::U128(u128::MAX));
    }

    #[test]
    fn unit_is_null() {
        assert_eq!(scalar_of(&()).value, ScalarValue::Null);
        assert_eq!(scalar_of(&PhantomData::<str>).value, ScalarValue::Null);
    }

    #[test]
    fn str_is_borrowed() {
        let s = scalar_of("hello");
        assert_eq!(s.ty, ScalarType::Str);
        assert!(matches!(s.value, ScalarValue::Str(Cow::Borrowed("hello"))));
    }

    #[test]
    fn scalar_shapes_are_scalars() {
        assert_eq!(<f64 as Reflect>::SHAPE.category(), Category::Scalar);
        assert_eq!(<f64 as Reflect>::SHAPE.to_string(), "f64");
        assert_eq!(<<bool as Reflect>::Layout as Layout>::KIND, LayoutKind::Scalar);
    }
}
