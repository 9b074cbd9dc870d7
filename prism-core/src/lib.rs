#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

mod types;
pub use types::*;

mod reflect;
pub use reflect::*;

pub mod peek;
pub use peek::{Peek, PeekEntry, PeekList, PeekMap, PeekPointer, PeekScalar, PeekStruct, Pointee};

mod map_key;
pub use map_key::*;

mod bytes;
pub use bytes::*;

// Definition for `core::` types
mod impls_core;

// Definition for `alloc::` types
mod impls_alloc;

// Definition for `std::` types (that aren't in `alloc` or `core`)
#[cfg(feature = "std")]
mod impls_std;

#[cfg(feature = "indexmap")]
mod impls_indexmap;
