use alloc::borrow::Cow;

/// All scalar types prism knows how to hand to a renderer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ScalarType {
    /// `()`
    Unit,
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `str`
    Str,
    /// `String`
    String,
    /// `Cow<'_, str>`
    CowStr,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `u128`
    U128,
    /// `usize`
    USize,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `i128`
    I128,
    /// `isize`
    ISize,
    /// Opaque run of bytes (see [`crate::ByteBuf`])
    Bytes,
}

impl ScalarType {
    /// Whether the type is one of the integer types.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            ScalarType::U8
                | ScalarType::U16
                | ScalarType::U32
                | ScalarType::U64
                | ScalarType::U128
                | ScalarType::USize
                | ScalarType::I8
                | ScalarType::I16
                | ScalarType::I32
                | ScalarType::I64
                | ScalarType::I128
                | ScalarType::ISize
        )
    }

    /// Whether values of this type always fit a signed 32-bit integer.
    pub const fn fits_i32(self) -> bool {
        matches!(
            self,
            ScalarType::U8 | ScalarType::U16 | ScalarType::I8 | ScalarType::I16 | ScalarType::I32
        )
    }
}

/// A scalar value, widened to a handful of representations.
///
/// The originating [`ScalarType`] travels alongside in [`crate::PeekScalar`],
/// so backends that care about the exact width can still tell an `i8` from an
/// `i64`.
#[derive(Clone, PartialEq, Debug)]
pub enum ScalarValue<'a> {
    /// The unit value, or an explicit null
    Null,
    /// A boolean
    Bool(bool),
    /// A single character
    Char(char),
    /// Any signed integer up to 64 bits
    I64(i64),
    /// Any unsigned integer up to 64 bits
    U64(u64),
    /// `i128`
    I128(i128),
    /// `u128`
    U128(u128),
    /// `f32`
    F32(f32),
    /// `f64`
    F64(f64),
    /// Text
    Str(Cow<'a, str>),
    /// Raw bytes
    Bytes(Cow<'a, [u8]>),
}
