#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use prism_core::*;

/// Derives `Reflect` and `Members` for a struct.
///
/// See the crate documentation for the supported `#[reflect(...)]`
/// attributes.
///
/// Only structs can be derived:
///
/// ```compile_fail
/// #[derive(prism::Reflect)]
/// enum Choice { A, B }
/// ```
///
/// A `shared` member must point at process-wide storage:
///
/// ```compile_fail
/// #[derive(prism::Reflect)]
/// #[reflect(shared(name = "args", path = std::env::args().count()))]
/// struct Computed;
/// ```
///
/// and a `constant` must be known at compile time:
///
/// ```compile_fail
/// #[derive(prism::Reflect)]
/// #[reflect(constant(name = "args", value = std::env::args().count()))]
/// struct Computed;
/// ```
///
/// A `base` must render as an object:
///
/// ```compile_fail
/// #[derive(prism::Reflect)]
/// struct NotABase {
///     #[reflect(base)]
///     count: u32,
/// }
/// ```
pub use prism_macros::Reflect;
