use std::borrow::Cow;
use std::fmt::{self, Debug};

/// Error produced while rendering a value.
#[derive(Debug)]
pub enum RenderError<E: Debug> {
    /// The backend refused an event; passed through unmodified.
    Backend(E),
    /// An inlined base or map produced a key its object already has.
    DuplicateKey(String),
    /// The traversal reached a state well-formed `Reflect` impls never
    /// produce, such as a scalar marked as an inlined base.
    Internal(Cow<'static, str>),
}

impl<E: Debug> RenderError<E> {
    /// The backend error, if that's what this is.
    pub fn backend(&self) -> Option<&E> {
        match self {
            RenderError::Backend(err) => Some(err),
            RenderError::DuplicateKey(_) | RenderError::Internal(_) => None,
        }
    }
}

impl<E: Debug> fmt::Display for RenderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Backend(err) => write!(f, "renderer error: {err:?}"),
            RenderError::DuplicateKey(key) => {
                write!(f, "key `{key}` appears more than once in one object")
            }
            RenderError::Internal(msg) => write!(f, "internal traversal error: {msg}"),
        }
    }
}

impl<E: Debug> std::error::Error for RenderError<E> {}
