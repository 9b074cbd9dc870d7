use std::fmt::Write as _;

use owo_colors::OwoColorize;
use prism_core::{PeekScalar, ScalarValue};
use prism_render::{AbsentPolicy, MapOrder, Renderer};

use crate::PrettyRenderError;

/// Options for tree rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Indentation per level (default: two spaces)
    pub indent: &'static str,

    /// Whether to emit ANSI colors (default: false)
    pub colors: bool,

    /// What to do with absent values (default: show them as `<absent>`)
    pub absent: AbsentPolicy,

    /// Whether to sort map entries by key (default: container order)
    pub sorted_maps: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderOptions {
    /// Two-space indent, no colors, absent values shown, maps in container
    /// order.
    pub const fn new() -> Self {
        Self {
            indent: "  ",
            colors: false,
            absent: AbsentPolicy::Null,
            sorted_maps: false,
        }
    }

    /// Set the indentation string.
    pub const fn indent(mut self, indent: &'static str) -> Self {
        self.indent = indent;
        self
    }

    /// Enable or disable ANSI colors.
    pub const fn colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Leave absent values out entirely.
    pub const fn skip_absent(mut self) -> Self {
        self.absent = AbsentPolicy::Skip;
        self
    }

    /// Show map entries sorted by key.
    pub const fn sorted_maps(mut self) -> Self {
        self.sorted_maps = true;
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Key,
    Index,
    Text,
    Number,
    Keyword,
    Punct,
}

/// Writes an indented tree for the events it receives.
pub struct PrettyRenderer {
    out: String,
    /// Whether each open container is still empty
    stack: Vec<bool>,
    options: RenderOptions,
}

impl Default for PrettyRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PrettyRenderer {
    /// A renderer with default options.
    pub fn new() -> Self {
        Self::with_options(RenderOptions::new())
    }

    /// A renderer with the given options.
    pub const fn with_options(options: RenderOptions) -> Self {
        Self {
            out: String::new(),
            stack: Vec::new(),
            options,
        }
    }

    /// Consumes the renderer, returning the tree.
    pub fn finish(self) -> String {
        self.out
    }

    fn paint(&mut self, tone: Tone, text: &str) -> Result<(), PrettyRenderError> {
        if !self.options.colors {
            self.out.push_str(text);
            return Ok(());
        }
        match tone {
            Tone::Key => write!(self.out, "{}", text.cyan())?,
            Tone::Index | Tone::Punct => write!(self.out, "{}", text.dimmed())?,
            Tone::Text => write!(self.out, "{}", text.yellow())?,
            Tone::Number => write!(self.out, "{}", text.blue())?,
            Tone::Keyword => write!(self.out, "{}", text.magenta())?,
        }
        Ok(())
    }

    /// Starts a new line for the next entry of the innermost container.
    fn entry(&mut self) -> Result<(), PrettyRenderError> {
        let Some(empty) = self.stack.last_mut() else {
            return Err(PrettyRenderError::Unbalanced("entry outside of a container"));
        };
        *empty = false;
        self.out.push('\n');
        for _ in 0..self.stack.len() {
            self.out.push_str(self.options.indent);
        }
        Ok(())
    }

    fn open(&mut self, bracket: &str) -> Result<(), PrettyRenderError> {
        self.paint(Tone::Punct, bracket)?;
        self.stack.push(true);
        Ok(())
    }

    fn close(&mut self, bracket: &str) -> Result<(), PrettyRenderError> {
        let Some(empty) = self.stack.pop() else {
            return Err(PrettyRenderError::Unbalanced("container closed without being opened"));
        };
        if !empty {
            self.out.push('\n');
            for _ in 0..self.stack.len() {
                self.out.push_str(self.options.indent);
            }
        }
        self.paint(Tone::Punct, bracket)
    }
}

impl Renderer for PrettyRenderer {
    type Error = PrettyRenderError;

    fn begin_object(&mut self) -> Result<(), PrettyRenderError> {
        self.open("{")
    }

    fn field_key(&mut self, key: &str) -> Result<(), PrettyRenderError> {
        self.entry()?;
        self.paint(Tone::Key, key)?;
        self.paint(Tone::Punct, ": ")
    }

    fn end_object(&mut self) -> Result<(), PrettyRenderError> {
        self.close("}")
    }

    fn begin_array(&mut self) -> Result<(), PrettyRenderError> {
        self.open("[")
    }

    fn array_slot(&mut self, index: usize) -> Result<(), PrettyRenderError> {
        self.entry()?;
        self.paint(Tone::Index, &format!("[{index}]"))?;
        self.paint(Tone::Punct, ": ")
    }

    fn end_array(&mut self) -> Result<(), PrettyRenderError> {
        self.close("]")
    }

    fn scalar(&mut self, scalar: PeekScalar<'_>) -> Result<(), PrettyRenderError> {
        match scalar.value {
            ScalarValue::Null => self.paint(Tone::Keyword, "()"),
            ScalarValue::Bool(v) => self.paint(Tone::Keyword, if v { "true" } else { "false" }),
            ScalarValue::Char(c) => self.paint(Tone::Text, &format!("{c:?}")),
            ScalarValue::I64(v) => self.paint(Tone::Number, &v.to_string()),
            ScalarValue::U64(v) => self.paint(Tone::Number, &v.to_string()),
            ScalarValue::I128(v) => self.paint(Tone::Number, &v.to_string()),
            ScalarValue::U128(v) => self.paint(Tone::Number, &v.to_string()),
            ScalarValue::F32(v) => self.paint(Tone::Number, &format!("{v:?}")),
            ScalarValue::F64(v) => self.paint(Tone::Number, &format!("{v:?}")),
            ScalarValue::Str(s) => self.paint(Tone::Text, &format!("{s:?}")),
            ScalarValue::Bytes(bytes) => {
                let mut text = String::from("b\"");
                for byte in bytes.iter() {
                    write!(text, "\\x{byte:02x}")?;
                }
                text.push('"');
                self.paint(Tone::Text, &text)
            }
        }
    }

    fn absent(&mut self) -> Result<(), PrettyRenderError> {
        self.paint(Tone::Keyword, "<absent>")
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
