use std::fmt;

/// Error produced by [`crate::BsonRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BsonRenderError {
    /// A value that isn't a document reached the root.
    RootNotDocument,
    /// Element names are C strings and cannot contain NUL.
    KeyContainsNul(String),
    /// BSON has no unsigned 64-bit integer.
    IntegerOverflow(u64),
    /// A document, string or binary exceeds the int32 length prefix.
    TooLarge(usize),
    /// Events arrived out of order.
    Unbalanced(&'static str),
}

impl fmt::Display for BsonRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BsonRenderError::RootNotDocument => {
                f.write_str("the root of a BSON document must be an object or an array")
            }
            BsonRenderError::KeyContainsNul(key) => {
                write!(f, "BSON element name {key:?} contains a NUL byte")
            }
            BsonRenderError::IntegerOverflow(n) => {
                write!(f, "{n} does not fit a BSON int64")
            }
            BsonRenderError::TooLarge(len) => {
                write!(f, "{len} bytes exceed the BSON int32 length limit")
            }
            BsonRenderError::Unbalanced(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for BsonRenderError {}
