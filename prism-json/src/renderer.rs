use prism_core::{PeekScalar, ScalarValue};
use prism_render::{AbsentPolicy, MapOrder, Renderer};

use crate::JsonRenderError;

/// Options for JSON rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Whether to pretty-print with indentation (default: false)
    pub pretty: bool,

    /// Indentation string for pretty-printing (default: two spaces)
    pub indent: &'static str,

    /// What to do with absent values (default: leave them out)
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
    /// Compact output, absent values left out, maps in container order.
    pub const fn new() -> Self {
        Self {
            pretty: false,
            indent: "  ",
            absent: AbsentPolicy::Skip,
            sorted_maps: false,
        }
    }

    /// Enable pretty-printing with the default indentation.
    pub const fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Set a custom indentation string (implies pretty-printing).
    pub const fn indent(mut self, indent: &'static str) -> Self {
        self.indent = indent;
        self.pretty = true;
        self
    }

    /// Render absent values as `null` instead of leaving them out.
    pub const fn absent_as_null(mut self) -> Self {
        self.absent = AbsentPolicy::Null;
        self
    }

    /// Render map entries sorted by key.
    pub const fn sorted_maps(mut self) -> Self {
        self.sorted_maps = true;
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum Ctx {
    Object { first: bool },
    Array { first: bool },
}

/// Writes JSON text for the events it receives.
pub struct JsonRenderer {
    out: String,
    stack: Vec<Ctx>,
    options: RenderOptions,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonRenderer {
    /// A renderer with default (compact) options.
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

    /// Consumes the renderer, returning what it wrote.
    pub fn finish(self) -> String {
        self.out
    }

    fn write_indent(&mut self) {
        if self.options.pretty {
            self.out.push('\n');
            for _ in 0..self.stack.len() {
                self.out.push_str(self.options.indent);
            }
        }
    }

    fn before_value(&mut self) {
        // object values are separated by `field_key`
        if let Some(Ctx::Array { first }) = self.stack.last_mut() {
            let was_first = std::mem::replace(first, false);
            if !was_first {
                self.out.push(',');
            }
            self.write_indent();
        }
    }

    fn write_string(&mut self, s: &str) {
        self.out.push('"');
        let mut start = 0;
        for (i, c) in s.char_indices() {
            if needs_escape(c) {
                self.out.push_str(&s[start..i]);
                self.write_escaped(c);
                start = i + c.len_utf8();
            }
        }
        self.out.push_str(&s[start..]);
        self.out.push('"');
    }

    fn write_escaped(&mut self, c: char) {
        match c {
            '"' => self.out.push_str("\\\""),
            '\\' => self.out.push_str("\\\\"),
            '\n' => self.out.push_str("\\n"),
            '\r' => self.out.push_str("\\r"),
            '\t' => self.out.push_str("\\t"),
            '\u{08}' => self.out.push_str("\\b"),
            '\u{0C}' => self.out.push_str("\\f"),
            c => {
                use std::fmt::Write as _;
                let _ = write!(self.out, "\\u{:04x}", c as u32);
            }
        }
    }

    fn write_number(&mut self, n: impl std::fmt::Display) {
        use std::fmt::Write as _;
        let _ = write!(self.out, "{n}");
    }

    fn write_float(&mut self, finite: bool, n: impl std::fmt::Display) {
        if finite {
            self.write_number(n);
        } else {
            self.out.push_str("null");
        }
    }
}

fn needs_escape(c: char) -> bool {
    matches!(c, '"' | '\\' | '\u{0}'..='\u{1f}' | '\u{7f}')
}

impl Renderer for JsonRenderer {
    type Error = JsonRenderError;

    fn begin_object(&mut self) -> Result<(), JsonRenderError> {
        self.before_value();
        self.out.push('{');
        self.stack.push(Ctx::Object { first: true });
        Ok(())
    }

    fn field_key(&mut self, key: &str) -> Result<(), JsonRenderError> {
        let Some(Ctx::Object { first }) = self.stack.last_mut() else {
            return Err(JsonRenderError::Unbalanced("field key outside of an object"));
        };
        let was_first = std::mem::replace(first, false);
        if !was_first {
            self.out.push(',');
        }
        self.write_indent();
        self.write_string(key);
        self.out.push(':');
        if self.options.pretty {
            self.out.push(' ');
        }
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), JsonRenderError> {
        let Some(Ctx::Object { first }) = self.stack.pop() else {
            return Err(JsonRenderError::Unbalanced("end_object without a matching begin_object"));
        };
        if !first {
            self.write_indent();
        }
        self.out.push('}');
        Ok(())
    }

    fn begin_array(&mut self) -> Result<(), JsonRenderError> {
        self.before_value();
        self.out.push('[');
        self.stack.push(Ctx::Array { first: true });
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), JsonRenderError> {
        let Some(Ctx::Array { first }) = self.stack.pop() else {
            return Err(JsonRenderError::Unbalanced("end_array without a matching begin_array"));
        };
        if !first {
            self.write_indent();
        }
        self.out.push(']');
        Ok(())
    }

    fn scalar(&mut self, scalar: PeekScalar<'_>) -> Result<(), JsonRenderError> {
        self.before_value();
        match scalar.value {
            ScalarValue::Null => self.out.push_str("null"),
            ScalarValue::Bool(v) => self.out.push_str(if v { "true" } else { "false" }),
            ScalarValue::Char(c) => {
                let mut buf = [0u8; 4];
                self.write_string(c.encode_utf8(&mut buf));
            }
            ScalarValue::I64(v) => self.write_number(v),
            ScalarValue::U64(v) => self.write_number(v),
            ScalarValue::I128(v) => self.write_number(v),
            ScalarValue::U128(v) => self.write_number(v),
            ScalarValue::F32(v) => self.write_float(v.is_finite(), v),
            ScalarValue::F64(v) => self.write_float(v.is_finite(), v),
            ScalarValue::Str(s) => self.write_string(&s),
            ScalarValue::Bytes(bytes) => {
                self.out.push('[');
                for (i, byte) in bytes.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.write_number(byte);
                }
                self.out.push(']');
            }
        }
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;
    use prism_testhelpers::test;

    fn escaped(s: &str) -> String {
        let mut renderer = JsonRenderer::new();
        renderer.write_string(s);
        renderer.finish()
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(escaped("plain"), r#""plain""#);
        assert_eq!(escaped("a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(escaped("line\nbreak\ttab"), r#""line\nbreak\ttab""#);
        assert_eq!(escaped("\u{1}\u{7f}"), r#""\u0001\u007f""#);
        assert_eq!(escaped("héllo ✓"), "\"héllo ✓\"");
    }

    #[test]
    fn keys_outside_objects_are_rejected() {
        let mut renderer = JsonRenderer::new();
        assert!(matches!(
            renderer.field_key("nope"),
            Err(JsonRenderError::Unbalanced(_))
        ));
        renderer.begin_array().unwrap();
        assert!(renderer.end_object().is_err());
    }

    #[test]
    fn options_feed_the_preferences() {
        let renderer =
            JsonRenderer::with_options(RenderOptions::new().absent_as_null().sorted_maps());
        assert_eq!(renderer.absent_policy(), AbsentPolicy::Null);
        assert_eq!(renderer.map_order(), MapOrder::Sorted);
        assert_eq!(JsonRenderer::new().absent_policy(), AbsentPolicy::Skip);
    }
}
