#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

use prism_core::{ArrayLayout, ObjectLayout, Reflect};
use prism_render::{RenderError, render_array, render_object};

mod error;
pub use error::*;

mod renderer;
pub use renderer::*;

/// Encodes `value` as a BSON document.
///
/// ```
/// use prism::Reflect;
///
/// #[derive(Reflect)]
/// struct Flag { on: bool }
///
/// let bytes = prism_bson::to_vec(&Flag { on: true }).unwrap();
/// assert_eq!(bytes, [0x0a, 0, 0, 0, 0x08, b'o', b'n', 0, 1, 0]);
/// ```
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>, RenderError<BsonRenderError>>
where
    T: Reflect<Layout = ObjectLayout> + ?Sized,
{
    to_vec_with_options(value, &RenderOptions::new())
}

/// Encodes `value` as a BSON document, with custom options.
pub fn to_vec_with_options<T>(
    value: &T,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError<BsonRenderError>>
where
    T: Reflect<Layout = ObjectLayout> + ?Sized,
{
    let mut renderer = BsonRenderer::with_options(options.clone());
    render_object(&mut renderer, value)?;
    renderer.finish().map_err(RenderError::Backend)
}

/// Encodes a sequence as a BSON document keyed by position.
///
/// Scalars can't be documents:
///
/// ```compile_fail
/// prism_bson::to_vec_array(&42u32).ok();
/// ```
pub fn to_vec_array<T>(value: &T) -> Result<Vec<u8>, RenderError<BsonRenderError>>
where
    T: Reflect<Layout = ArrayLayout> + ?Sized,
{
    to_vec_array_with_options(value, &RenderOptions::new())
}

/// Encodes a sequence as a BSON document keyed by position, with custom
/// options.
pub fn to_vec_array_with_options<T>(
    value: &T,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError<BsonRenderError>>
where
    T: Reflect<Layout = ArrayLayout> + ?Sized,
{
    let mut renderer = BsonRenderer::with_options(options.clone());
    render_array(&mut renderer, value)?;
    renderer.finish().map_err(RenderError::Backend)
}
