#![doc = include_str!("../README.md")]

mod derive;
mod parse;

/// Derives `Reflect` and `Members` for a struct.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn reflect_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    derive::reflect_derive(input.into()).into()
}
