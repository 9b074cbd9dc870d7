#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

use std::fmt;

use prism_core::Reflect;
use prism_render::{RenderError, render};

mod renderer;
pub use renderer::*;

/// Error produced by [`PrettyRenderer`].
#[derive(Debug)]
pub enum PrettyRenderError {
    /// Formatting a value failed.
    Fmt(fmt::Error),
    /// Events arrived out of order.
    Unbalanced(&'static str),
}

impl fmt::Display for PrettyRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrettyRenderError::Fmt(_) => f.write_str("failed to format value"),
            PrettyRenderError::Unbalanced(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for PrettyRenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PrettyRenderError::Fmt(err) => Some(err),
            PrettyRenderError::Unbalanced(_) => None,
        }
    }
}

impl From<fmt::Error> for PrettyRenderError {
    fn from(err: fmt::Error) -> Self {
        PrettyRenderError::Fmt(err)
    }
}

/// Renders `value` as an uncolored tree.
pub fn to_string<T>(value: &T) -> Result<String, RenderError<PrettyRenderError>>
where
    T: Reflect + ?Sized,
{
    to_string_with_options(value, &RenderOptions::new())
}

/// Renders `value` as a tree, with custom options.
pub fn to_string_with_options<T>(
    value: &T,
    options: &RenderOptions,
) -> Result<String, RenderError<PrettyRenderError>>
where
    T: Reflect + ?Sized,
{
    let mut renderer = PrettyRenderer::with_options(options.clone());
    render(&mut renderer, value)?;
    Ok(renderer.finish())
}
