use std::fmt;

/// Error produced by [`crate::JsonRenderer`].
#[derive(Debug)]
pub enum JsonRenderError {
    /// An event arrived where JSON can't take it (a key outside an object,
    /// an unmatched close).
    Unbalanced(&'static str),
    /// Writing the output failed.
    Io(std::io::Error),
}

impl fmt::Display for JsonRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonRenderError::Unbalanced(msg) => f.write_str(msg),
            JsonRenderError::Io(err) => write!(f, "failed to write JSON: {err}"),
        }
    }
}

impl std::error::Error for JsonRenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JsonRenderError::Io(err) => Some(err),
            JsonRenderError::Unbalanced(_) => None,
        }
    }
}
