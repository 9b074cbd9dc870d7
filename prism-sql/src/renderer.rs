use std::collections::BTreeSet;

use prism_core::{PeekScalar, ScalarValue};
use prism_render::{AbsentPolicy, MapOrder, Renderer};

use crate::{Params, PlaceholderStyle, SqlRenderError, SqlValue};

/// Column name given to a scalar rendered at the root.
pub const ROOT_COLUMN: &str = "value";

/// Options for parameter rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Placeholder spelling (default: `?`)
    pub placeholders: PlaceholderStyle,

    /// What to do with absent values (default: leave them out)
    pub absent: AbsentPolicy,

    /// Whether to sort map entries by key (default: container order)
    pub sorted_maps: bool,
}

impl RenderOptions {
    /// `?` placeholders, absent values left out, maps in container order.
    pub const fn new() -> Self {
        Self {
            placeholders: PlaceholderStyle::Question,
            absent: AbsentPolicy::Skip,
            sorted_maps: false,
        }
    }

    /// Use the given placeholder spelling.
    pub const fn placeholders(mut self, style: PlaceholderStyle) -> Self {
        self.placeholders = style;
        self
    }

    /// Bind absent values as `NULL` instead of leaving them out.
    pub const fn absent_as_null(mut self) -> Self {
        self.absent = AbsentPolicy::Null;
        self
    }

    /// Visit map entries sorted by key.
    pub const fn sorted_maps(mut self) -> Self {
        self.sorted_maps = true;
        self
    }
}

/// Collects every scalar it receives into [`Params`].
///
/// Scope boundaries produce no parameters; they only extend the path that
/// names each column.
pub struct ParamsRenderer {
    params: Params,
    /// Path segments of the open scopes
    path: Vec<String>,
    /// Whether each open scope added a segment to `path` (the root doesn't)
    named: Vec<bool>,
    /// Name of the next value in the innermost scope
    pending: Option<String>,
    /// Columns emitted so far; `_` joins make `a_b` and `a.b` collide
    seen: BTreeSet<String>,
    options: RenderOptions,
}

impl Default for ParamsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamsRenderer {
    /// A renderer with default options.
    pub fn new() -> Self {
        Self::with_options(RenderOptions::new())
    }

    /// A renderer with the given options.
    pub const fn with_options(options: RenderOptions) -> Self {
        Self {
            params: Params {
                values: Vec::new(),
                placeholders: Vec::new(),
                columns: Vec::new(),
            },
            path: Vec::new(),
            named: Vec::new(),
            pending: None,
            seen: BTreeSet::new(),
            options,
        }
    }

    /// Consumes the renderer, returning the collected parameters.
    pub fn finish(self) -> Result<Params, SqlRenderError> {
        if !self.named.is_empty() {
            return Err(SqlRenderError::Unbalanced("scope was never closed"));
        }
        Ok(self.params)
    }

    fn open(&mut self) {
        match self.pending.take() {
            Some(segment) => {
                self.path.push(segment);
                self.named.push(true);
            }
            None => self.named.push(false),
        }
    }

    fn close(&mut self) -> Result<(), SqlRenderError> {
        match self.named.pop() {
            Some(true) => {
                self.path.pop();
                Ok(())
            }
            Some(false) => Ok(()),
            None => Err(SqlRenderError::Unbalanced("scope closed without being opened")),
        }
    }

    fn push(&mut self, value: SqlValue) -> Result<(), SqlRenderError> {
        let mut column = self.path.join("_");
        if let Some(segment) = self.pending.take() {
            if !column.is_empty() {
                column.push('_');
            }
            column.push_str(&segment);
        }
        if column.is_empty() {
            column.push_str(ROOT_COLUMN);
        }
        if !self.seen.insert(column.clone()) {
            return Err(SqlRenderError::DuplicateColumn(column));
        }

        self.params.values.push(value);
        let position = self.params.values.len();
        self.params
            .placeholders
            .push(self.options.placeholders.placeholder(position));
        self.params.columns.push(column);
        Ok(())
    }
}

impl Renderer for ParamsRenderer {
    type Error = SqlRenderError;

    fn begin_object(&mut self) -> Result<(), SqlRenderError> {
        self.open();
        Ok(())
    }

    fn field_key(&mut self, key: &str) -> Result<(), SqlRenderError> {
        self.pending = Some(key.to_string());
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), SqlRenderError> {
        self.close()
    }

    fn begin_array(&mut self) -> Result<(), SqlRenderError> {
        self.open();
        Ok(())
    }

    fn array_slot(&mut self, index: usize) -> Result<(), SqlRenderError> {
        self.pending = Some(index.to_string());
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), SqlRenderError> {
        self.close()
    }

    fn scalar(&mut self, scalar: PeekScalar<'_>) -> Result<(), SqlRenderError> {
        let value = match scalar.value {
            ScalarValue::Null => SqlValue::Null,
            ScalarValue::Bool(v) => SqlValue::Bool(v),
            ScalarValue::Char(c) => SqlValue::Text(c.to_string()),
            ScalarValue::I64(v) => SqlValue::Int(v),
            ScalarValue::U64(v) => {
                SqlValue::Int(i64::try_from(v).map_err(|_| SqlRenderError::IntegerOverflow(v))?)
            }
            ScalarValue::I128(v) => SqlValue::Text(v.to_string()),
            ScalarValue::U128(v) => SqlValue::Text(v.to_string()),
            ScalarValue::F32(v) => SqlValue::Real(f64::from(v)),
            ScalarValue::F64(v) => SqlValue::Real(v),
            ScalarValue::Str(s) => SqlValue::Text(s.into_owned()),
            ScalarValue::Bytes(bytes) => SqlValue::Blob(bytes.into_owned()),
        };
        self.push(value)
    }

    fn absent(&mut self) -> Result<(), SqlRenderError> {
        self.push(SqlValue::Null)
    }

    fn absent_policy(&self) -> AbsentPolicy {
        self.options.absent
    }

    fn map_order(&self) -> MapOrder {
        if self.options.sorted_maps {
            MapOrder::Sorted
        } else {
            MapOrder::Source
        }
    }
}
