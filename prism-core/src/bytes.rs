use alloc::{borrow::Cow, vec::Vec};
use core::ops::{Deref, DerefMut};

use crate::{Def, Peek, PeekScalar, Reflect, ScalarLayout, ScalarType, ScalarValue, Shape};

/// A byte buffer reflected as a single opaque scalar.
///
/// A plain `Vec<u8>` is a sequence of numbers; wrap it in `ByteBuf` to have
/// renderers treat it as a blob instead (BSON binary, for instance).
#[derive(Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct ByteBuf(pub Vec<u8>);

impl ByteBuf {
    /// Wraps an existing buffer.
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Unwraps the buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for ByteBuf {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ByteBuf {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl Deref for ByteBuf {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ByteBuf {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Reflect for ByteBuf {
    const SHAPE: &'static Shape = &const { Shape::new("ByteBuf", Def::Scalar(ScalarType::Bytes)) };
    type Layout = ScalarLayout;

    fn peek(&self) -> Peek<'_> {
        Peek::Scalar(PeekScalar::new(
            ScalarType::Bytes,
            ScalarValue::Bytes(Cow::Borrowed(self.0.as_slice())),
        ))
    }
}
