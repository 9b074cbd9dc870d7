#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

use prism_core::Reflect;
use prism_render::{RenderError, render};

mod error;
pub use error::*;

mod params;
pub use params::*;

mod renderer;
pub use renderer::*;

/// Flattens `value` into bind parameters with `?` placeholders.
pub fn to_params<T>(value: &T) -> Result<Params, RenderError<SqlRenderError>>
where
    T: Reflect + ?Sized,
{
    to_params_with_options(value, &RenderOptions::new())
}

/// Flattens `value` into bind parameters, with custom options.
pub fn to_params_with_options<T>(
    value: &T,
    options: &RenderOptions,
) -> Result<Params, RenderError<SqlRenderError>>
where
    T: Reflect + ?Sized,
{
    let mut renderer = ParamsRenderer::with_options(options.clone());
    render(&mut renderer, value)?;
    renderer.finish().map_err(RenderError::Backend)
}
