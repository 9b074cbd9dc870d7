use alloc::{borrow::Cow, string::String};

use crate::{Def, Peek, PeekScalar, Reflect, ScalarLayout, ScalarType, Shape};

impl Reflect for String {
    const SHAPE: &'static Shape =
        &const { Shape::new("String", Def::Scalar(ScalarType::String)) };
    type Layout = ScalarLayout;

    #[inline]
    fn peek(&self) -> Peek<'_> {
        Peek::Scalar(PeekScalar::str(ScalarType::String, self))
    }
}

impl Reflect for Cow<'_, str> {
    const SHAPE: &'static Shape =
        &const { Shape::new("Cow<str>", Def::Scalar(ScalarType::CowStr)) };
    type Layout = ScalarLayout;

    #[inline]
    fn peek(&self) -> Peek<'_> {
        Peek::Scalar(PeekScalar::str(ScalarType::CowStr, self))
    }
}
