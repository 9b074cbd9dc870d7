//! Proc-macro half of `prism-testhelpers`. Use it through
//! `prism_testhelpers::test`.

use unsynn::*;

keyword! {
    KFn = "fn";
}

unsynn! {
    // attributes, visibility and qualifiers before `fn`
    struct Prelude {
        items: Any<Cons<Except<KFn>, TokenTree>>,
    }

    // parameters and return type, up to the body
    struct Signature {
        items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct TestFn {
        prelude: Prelude,
        _fn: KFn,
        name: Ident,
        signature: Signature,
        body: BraceGroup,
    }
}

impl quote::ToTokens for Prelude {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Signature {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.items.to_tokens(tokens)
    }
}

/// Marks a test function and installs the shared tracing subscriber before
/// its body runs.
///
/// ```ignore
/// use prism_testhelpers::test;
///
/// #[test]
/// fn renders_nested_objects() {
///     // `PRISM_LOG`-filtered tracing output is captured here
/// }
/// ```
///
/// An argument swaps the underlying test attribute:
///
/// ```ignore
/// #[prism_testhelpers::test(tokio::test)]
/// async fn async_case() {}
/// ```
#[proc_macro_attribute]
pub fn test(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let mut iter = item.to_token_iter();
    let TestFn {
        prelude,
        _fn,
        name,
        signature,
        body,
    } = match iter.parse::<TestFn>() {
        Ok(parsed) => parsed,
        Err(_) => {
            return quote::quote! {
                ::core::compile_error!("#[prism_testhelpers::test] expects a function");
            }
            .into();
        }
    };

    let test_attr = if attr.is_empty() {
        quote::quote! { #[::core::prelude::rust_2024::test] }
    } else {
        let attr = TokenStream::from(attr);
        quote::quote! { #[#attr] }
    };
    let body = body.0.stream();

    quote::quote! {
        #test_attr
        #prelude fn #name #signature {
            ::prism_testhelpers::setup();

            #body
        }
    }
    .into()
}
