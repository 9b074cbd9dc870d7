#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

use std::io::Write;

use prism_core::Reflect;
use prism_render::{RenderError, render};

mod error;
pub use error::*;

mod renderer;
pub use renderer::*;

/// Renders `value` as compact JSON bytes.
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>, RenderError<JsonRenderError>>
where
    T: Reflect + ?Sized,
{
    to_vec_with_options(value, &RenderOptions::new())
}

/// Renders `value` as JSON bytes with custom options.
pub fn to_vec_with_options<T>(
    value: &T,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError<JsonRenderError>>
where
    T: Reflect + ?Sized,
{
    Ok(to_string_with_options(value, options)?.into_bytes())
}

/// Renders `value` as a compact JSON string.
///
/// ```
/// use prism::Reflect;
///
/// #[derive(Reflect)]
/// struct Person { name: String, age: u32 }
///
/// let person = Person { name: "Alice".into(), age: 30 };
/// let json = prism_json::to_string(&person).unwrap();
/// assert_eq!(json, r#"{"name":"Alice","age":30}"#);
/// ```
pub fn to_string<T>(value: &T) -> Result<String, RenderError<JsonRenderError>>
where
    T: Reflect + ?Sized,
{
    to_string_with_options(value, &RenderOptions::new())
}

/// Renders `value` as an indented JSON string.
pub fn to_string_pretty<T>(value: &T) -> Result<String, RenderError<JsonRenderError>>
where
    T: Reflect + ?Sized,
{
    to_string_with_options(value, &RenderOptions::new().pretty())
}

/// Renders `value` as a JSON string with custom options.
///
/// ```
/// use prism::Reflect;
/// use prism_json::{RenderOptions, to_string_with_options};
///
/// #[derive(Reflect)]
/// struct Point { x: i32, y: Option<i32> }
///
/// let point = Point { x: 1, y: None };
/// let json = to_string_with_options(&point, &RenderOptions::new().absent_as_null()).unwrap();
/// assert_eq!(json, r#"{"x":1,"y":null}"#);
///
/// let json = to_string_with_options(&point, &RenderOptions::new().indent("\t")).unwrap();
/// assert_eq!(json, "{\n\t\"x\": 1\n}");
/// ```
pub fn to_string_with_options<T>(
    value: &T,
    options: &RenderOptions,
) -> Result<String, RenderError<JsonRenderError>>
where
    T: Reflect + ?Sized,
{
    let mut renderer = JsonRenderer::with_options(options.clone());
    render(&mut renderer, value)?;
    Ok(renderer.finish())
}

/// Renders `value` as compact JSON into `writer`.
///
/// ```
/// let mut buffer = Vec::new();
/// prism_json::to_writer(&mut buffer, &[1, 2, 3]).unwrap();
/// assert_eq!(buffer, b"[1,2,3]");
/// ```
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<(), RenderError<JsonRenderError>>
where
    W: Write,
    T: Reflect + ?Sized,
{
    to_writer_with_options(writer, value, &RenderOptions::new())
}

/// Renders `value` as JSON into `writer`, with custom options.
pub fn to_writer_with_options<W, T>(
    mut writer: W,
    value: &T,
    options: &RenderOptions,
) -> Result<(), RenderError<JsonRenderError>>
where
    W: Write,
    T: Reflect + ?Sized,
{
    let json = to_string_with_options(value, options)?;
    writer
        .write_all(json.as_bytes())
        .map_err(|err| RenderError::Backend(JsonRenderError::Io(err)))
}
