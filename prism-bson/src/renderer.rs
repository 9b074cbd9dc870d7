use prism_core::{PeekScalar, ScalarValue};
use prism_render::{AbsentPolicy, MapOrder, Renderer};

use crate::BsonRenderError;

const DOUBLE: u8 = 0x01;
const STRING: u8 = 0x02;
const DOCUMENT: u8 = 0x03;
const ARRAY: u8 = 0x04;
const BINARY: u8 = 0x05;
const BOOLEAN: u8 = 0x08;
const NULL: u8 = 0x0A;
const INT32: u8 = 0x10;
const INT64: u8 = 0x12;

const BINARY_GENERIC: u8 = 0x00;

/// Options for BSON rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// What to do with absent values (default: leave them out)
    pub absent: AbsentPolicy,

    /// Whether to sort map entries by key (default: container order)
    pub sorted_maps: bool,
}

impl RenderOptions {
    /// Absent values left out, maps in container order.
    pub const fn new() -> Self {
        Self {
            absent: AbsentPolicy::Skip,
            sorted_maps: false,
        }
    }

    /// Encode absent values as BSON null instead of leaving them out.
    pub const fn absent_as_null(mut self) -> Self {
        self.absent = AbsentPolicy::Null;
        self
    }

    /// Encode map entries sorted by key.
    pub const fn sorted_maps(mut self) -> Self {
        self.sorted_maps = true;
        self
    }
}

#[derive(Debug)]
enum Frame {
    Document { len_pos: usize, key: Option<String> },
    Array { len_pos: usize, next: usize },
}

/// Builds a BSON document from the events it receives.
///
/// Every document and array starts with an int32 length that is only known
/// once it is closed; a placeholder is written up front and patched on close.
pub struct BsonRenderer {
    out: Vec<u8>,
    stack: Vec<Frame>,
    options: RenderOptions,
}

impl Default for BsonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BsonRenderer {
    /// A renderer with default options.
    pub fn new() -> Self {
        Self::with_options(RenderOptions::new())
    }

    /// A renderer with the given options.
    pub const fn with_options(options: RenderOptions) -> Self {
        Self {
            out: Vec::new(),
            stack: Vec::new(),
            options,
        }
    }

    /// Consumes the renderer, returning the encoded document.
    pub fn finish(self) -> Result<Vec<u8>, BsonRenderError> {
        if !self.stack.is_empty() {
            return Err(BsonRenderError::Unbalanced("document was never closed"));
        }
        if self.out.is_empty() {
            return Err(BsonRenderError::RootNotDocument);
        }
        Ok(self.out)
    }

    /// Writes the type byte and name of the next element in the innermost
    /// container.
    fn element(&mut self, tag: u8) -> Result<(), BsonRenderError> {
        let key = match self.stack.last_mut() {
            None => return Err(BsonRenderError::RootNotDocument),
            Some(Frame::Document { key, .. }) => key
                .take()
                .ok_or(BsonRenderError::Unbalanced("document element without a field key"))?,
            Some(Frame::Array { next, .. }) => {
                let index = *next;
                *next += 1;
                index.to_string()
            }
        };
        self.out.push(tag);
        self.write_cstring(&key);
        Ok(())
    }

    fn write_cstring(&mut self, s: &str) {
        self.out.extend_from_slice(s.as_bytes());
        self.out.push(0);
    }

    fn write_len(&mut self, len: usize) -> Result<(), BsonRenderError> {
        let len = i32::try_from(len).map_err(|_| BsonRenderError::TooLarge(len))?;
        self.out.extend_from_slice(&len.to_le_bytes());
        Ok(())
    }

    fn write_string(&mut self, s: &str) -> Result<(), BsonRenderError> {
        self.element(STRING)?;
        self.write_len(s.len() + 1)?;
        self.write_cstring(s);
        Ok(())
    }

    /// int32 for the narrow integer types, int64 for everything else.
    fn write_int(&mut self, narrow: bool, v: i64) -> Result<(), BsonRenderError> {
        match i32::try_from(v) {
            Ok(v) if narrow => {
                self.element(INT32)?;
                self.out.extend_from_slice(&v.to_le_bytes());
            }
            _ => {
                self.element(INT64)?;
                self.out.extend_from_slice(&v.to_le_bytes());
            }
        }
        Ok(())
    }

    /// Opens a document or array, as an element unless it is the root.
    fn open(&mut self, tag: u8, frame: impl FnOnce(usize) -> Frame) -> Result<(), BsonRenderError> {
        if !self.stack.is_empty() {
            self.element(tag)?;
        } else if !self.out.is_empty() {
            return Err(BsonRenderError::Unbalanced("a BSON buffer holds a single root document"));
        }
        let len_pos = self.out.len();
        self.out.extend_from_slice(&[0; 4]);
        self.stack.push(frame(len_pos));
        Ok(())
    }

    fn close(&mut self, len_pos: usize) -> Result<(), BsonRenderError> {
        self.out.push(0);
        let len = self.out.len() - len_pos;
        let len = i32::try_from(len).map_err(|_| BsonRenderError::TooLarge(len))?;
        self.out[len_pos..len_pos + 4].copy_from_slice(&len.to_le_bytes());
        Ok(())
    }
}

impl Renderer for BsonRenderer {
    type Error = BsonRenderError;

    fn begin_object(&mut self) -> Result<(), BsonRenderError> {
        self.open(DOCUMENT, |len_pos| Frame::Document { len_pos, key: None })
    }

    fn field_key(&mut self, key: &str) -> Result<(), BsonRenderError> {
        if key.contains('\0') {
            return Err(BsonRenderError::KeyContainsNul(key.to_string()));
        }
        match self.stack.last_mut() {
            Some(Frame::Document { key: pending, .. }) => {
                *pending = Some(key.to_string());
                Ok(())
            }
            _ => Err(BsonRenderError::Unbalanced("field key outside of a document")),
        }
    }

    fn end_object(&mut self) -> Result<(), BsonRenderError> {
        match self.stack.pop() {
            Some(Frame::Document { len_pos, .. }) => self.close(len_pos),
            _ => Err(BsonRenderError::Unbalanced("end_object without a matching begin_object")),
        }
    }

    fn begin_array(&mut self) -> Result<(), BsonRenderError> {
        // at the root this is a document keyed by position
        self.open(ARRAY, |len_pos| Frame::Array { len_pos, next: 0 })
    }

    fn end_array(&mut self) -> Result<(), BsonRenderError> {
        match self.stack.pop() {
            Some(Frame::Array { len_pos, .. }) => self.close(len_pos),
            _ => Err(BsonRenderError::Unbalanced("end_array without a matching begin_array")),
        }
    }

    fn scalar(&mut self, scalar: PeekScalar<'_>) -> Result<(), BsonRenderError> {
        match scalar.value {
            ScalarValue::Null => self.element(NULL)?,
            ScalarValue::Bool(v) => {
                self.element(BOOLEAN)?;
                self.out.push(u8::from(v));
            }
            ScalarValue::Char(c) => {
                let mut buf = [0u8; 4];
                self.write_string(c.encode_utf8(&mut buf))?;
            }
            ScalarValue::I64(v) => self.write_int(scalar.ty.fits_i32(), v)?,
            ScalarValue::U64(v) => {
                let v = i64::try_from(v).map_err(|_| BsonRenderError::IntegerOverflow(v))?;
                self.write_int(scalar.ty.fits_i32(), v)?;
            }
            ScalarValue::I128(v) => self.write_string(&v.to_string())?,
            ScalarValue::U128(v) => self.write_string(&v.to_string())?,
            ScalarValue::F32(v) => {
                self.element(DOUBLE)?;
                self.out.extend_from_slice(&f64::from(v).to_le_bytes());
            }
            ScalarValue::F64(v) => {
                self.element(DOUBLE)?;
                self.out.extend_from_slice(&v.to_le_bytes());
            }
            ScalarValue::Str(s) => self.write_string(&s)?,
            ScalarValue::Bytes(bytes) => {
                self.element(BINARY)?;
                self.write_len(bytes.len())?;
                self.out.push(BINARY_GENERIC);
                self.out.extend_from_slice(&bytes);
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
    use prism_core::ScalarType;
    use prism_testhelpers::test;

    #[test]
    fn lengths_are_patched_on_close() {
        let mut renderer = BsonRenderer::new();
        renderer.begin_object().unwrap();
        renderer.field_key("s").unwrap();
        renderer.scalar(PeekScalar::str(ScalarType::Str, "hi")).unwrap();
        renderer.end_object().unwrap();
        let bytes = renderer.finish().unwrap();
        assert_eq!(
            bytes,
            [
                0x0f, 0, 0, 0, // document length
                STRING, b's', 0, // element name
                3, 0, 0, 0, b'h', b'i', 0, // string
                0,
            ]
        );
    }

    #[test]
    fn scalars_need_a_document() {
        let mut renderer = BsonRenderer::new();
        assert_eq!(
            renderer.scalar(PeekScalar::null()),
            Err(BsonRenderError::RootNotDocument)
        );
        assert_eq!(
            BsonRenderer::new().finish(),
            Err(BsonRenderError::RootNotDocument)
        );
    }

    #[test]
    fn unclosed_documents_are_reported() {
        let mut renderer = BsonRenderer::new();
        renderer.begin_object().unwrap();
        assert!(matches!(
            renderer.finish(),
            Err(BsonRenderError::Unbalanced(_))
        ));
    }

    #[test]
    fn nul_in_keys_is_rejected() {
        let mut renderer = BsonRenderer::new();
        renderer.begin_object().unwrap();
        assert_eq!(
            renderer.field_key("a\0b"),
            Err(BsonRenderError::KeyContainsNul("a\0b".to_string()))
        );
    }
}
