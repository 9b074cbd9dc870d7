use std::fmt;

/// Error produced by [`crate::ParamsRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlRenderError {
    /// SQL integers are signed 64-bit.
    IntegerOverflow(u64),
    /// Two values flattened to the same column name, such as member `a_b`
    /// next to member `b` of a nested `a`.
    DuplicateColumn(String),
    /// Events arrived out of order.
    Unbalanced(&'static str),
}

impl fmt::Display for SqlRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlRenderError::IntegerOverflow(n) => write!(f, "{n} does not fit a SQL BIGINT"),
            SqlRenderError::DuplicateColumn(column) => {
                write!(f, "more than one value flattens to column `{column}`")
            }
            SqlRenderError::Unbalanced(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for SqlRenderError {}
