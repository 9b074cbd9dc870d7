use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{quote, quote_spanned};

use crate::parse::{
    BodyKind, FieldKind, ParamKind, ParsedField, ParsedStruct, StaticMember, parse_struct,
};

pub(crate) fn reflect_derive(input: TokenStream) -> TokenStream {
    match parse_struct(input) {
        Ok(parsed) => emit(&parsed),
        Err(err) => {
            let msg = err.msg;
            quote_spanned! { err.span => ::core::compile_error!(#msg); }
        }
    }
}

fn emit(parsed: &ParsedStruct) -> TokenStream {
    let name = &parsed.name;
    let type_identifier = &parsed.type_identifier;
    let doc = &parsed.doc;

    let impl_params = parsed.generics.params.iter().map(|p| &p.decl);
    let type_args = parsed.generics.params.iter().map(|p| &p.name);
    let bounds = parsed
        .generics
        .params
        .iter()
        .filter(|p| p.kind == ParamKind::Type)
        .map(|p| {
            let name = &p.name;
            quote! { #name: ::prism::Reflect }
        });
    let predicates: Vec<TokenStream> = parsed
        .generics
        .predicates
        .iter()
        .cloned()
        .chain(bounds)
        .collect();

    let (impl_generics, type_generics) = if parsed.generics.params.is_empty() {
        (TokenStream::new(), TokenStream::new())
    } else {
        (
            quote! { <#(#impl_params),*> },
            quote! { <#(#type_args),*> },
        )
    };
    let where_clause = if predicates.is_empty() {
        TokenStream::new()
    } else {
        quote! { where #(#predicates),* }
    };

    let struct_kind = Ident::new(
        match parsed.kind {
            BodyKind::Named => "Struct",
            BodyKind::Tuple => "TupleStruct",
            BodyKind::Unit => "Unit",
        },
        Span::call_site(),
    );

    // registered members first, then fields, each in declaration order
    let members: Vec<&ParsedField> = parsed.fields.iter().filter(|f| !f.skip).collect();
    let descriptors: Vec<TokenStream> = parsed
        .statics
        .iter()
        .map(static_descriptor)
        .chain(members.iter().map(|f| member_descriptor(f)))
        .collect();
    let member_list = if descriptors.is_empty() {
        quote! { &[] }
    } else {
        quote! { &const { [#(#descriptors),*] } }
    };

    let offset = parsed.statics.len();
    let arms: Vec<TokenStream> = parsed
        .statics
        .iter()
        .enumerate()
        .map(|(index, m)| static_arm(index, m))
        .chain(
            members
                .iter()
                .enumerate()
                .map(|(index, f)| accessor_arm(offset + index, f)),
        )
        .collect();

    quote! {
        #[automatically_derived]
        impl #impl_generics ::prism::Reflect for #name #type_generics #where_clause {
            const SHAPE: &'static ::prism::Shape = &const {
                ::prism::Shape::new(
                    #type_identifier,
                    ::prism::Def::Struct(::prism::StructType::new(
                        ::prism::StructKind::#struct_kind,
                        #member_list,
                    )),
                )
                .with_doc(&[#(#doc),*])
            };
            type Layout = ::prism::ObjectLayout;

            #[inline]
            fn peek(&self) -> ::prism::Peek<'_> {
                ::prism::Peek::Struct(::prism::PeekStruct::new(
                    <Self as ::prism::Reflect>::SHAPE,
                    self,
                ))
            }
        }

        #[automatically_derived]
        impl #impl_generics ::prism::Members for #name #type_generics #where_clause {
            fn member(&self, index: usize) -> ::core::option::Option<&dyn ::prism::DynReflect> {
                match index {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}

/// `Member::new(..)` for one field.
fn member_descriptor(field: &ParsedField) -> TokenStream {
    let ty = &field.ty;
    let kind = Ident::new(field.kind.variant(), Span::call_site());
    let doc = &field.doc;

    let name = match (&field.rename, field.kind) {
        (Some(rename), _) => rename.clone(),
        // a base is named after its type, pointers looked through
        (None, FieldKind::Base) => quote! {
            <#ty as ::prism::Reflect>::SHAPE.innermost().type_identifier
        },
        (None, _) => {
            let lit = Literal::string(&field.default_name);
            quote! { #lit }
        }
    };

    let member = quote! {
        ::prism::Member::new(#name, ::prism::MemberKind::#kind, ::prism::shape_of::<#ty>)
    };
    if doc.is_empty() {
        member
    } else {
        quote! { #member.with_doc(&[#(#doc),*]) }
    }
}

/// `Member::new(..)` for a member registered on the container. Its shape is
/// read off the static or constant itself.
fn static_descriptor(member: &StaticMember) -> TokenStream {
    let name = &member.name;
    let source = &member.source;
    let kind = Ident::new(member.kind.variant(), Span::call_site());
    quote! {
        ::prism::Member::new(#name, ::prism::MemberKind::#kind, || ::prism::shape_of_val(&#source))
    }
}

/// The `Members::member` arm for a registered member; it never reads `self`.
fn static_arm(index: usize, member: &StaticMember) -> TokenStream {
    let index = Literal::usize_unsuffixed(index);
    let source = &member.source;
    match member.kind {
        FieldKind::Const => quote! {
            #index => ::core::option::Option::Some(const { &#source }),
        },
        _ => quote! {
            #index => {
                let value: &'static _ = &#source;
                ::core::option::Option::Some(value)
            }
        },
    }
}

/// The `Members::member` arm handing out one field.
fn accessor_arm(index: usize, field: &ParsedField) -> TokenStream {
    let index = Literal::usize_unsuffixed(index);
    let access = &field.access;
    let ty = &field.ty;

    match field.kind {
        FieldKind::Base | FieldKind::BaseInline => quote! {
            #index => {
                ::prism::assert_object_layout::<#ty>();
                ::core::option::Option::Some(&self.#access)
            }
        },
        FieldKind::Value | FieldKind::Ref | FieldKind::Const => quote! {
            #index => ::core::option::Option::Some(&self.#access),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_testhelpers::test;

    fn expand(input: TokenStream) -> String {
        reflect_derive(input).to_string().replace(' ', "")
    }

    #[test]
    fn emits_both_impls() {
        let out = expand(quote! {
            struct Point { x: i32, y: i32 }
        });
        assert!(out.contains("impl::prism::ReflectforPoint"));
        assert!(out.contains("impl::prism::MembersforPoint"));
        assert!(out.contains("::prism::Member::new(\"x\",::prism::MemberKind::Value"));
        assert!(out.contains("1=>::core::option::Option::Some(&self.y)"));
    }

    #[test]
    fn skipped_fields_do_not_shift_into_the_accessor() {
        let out = expand(quote! {
            struct S { #[reflect(skip)] hidden: u8, shown: u8 }
        });
        assert!(!out.contains("\"hidden\""));
        assert!(out.contains("0=>::core::option::Option::Some(&self.shown)"));
    }

    #[test]
    fn bases_are_named_after_their_type() {
        let out = expand(quote! {
            struct S { #[reflect(base)] parent: Parent }
        });
        assert!(out.contains("<Parentas::prism::Reflect>::SHAPE.innermost().type_identifier"));
        assert!(out.contains("::prism::assert_object_layout::<Parent>()"));
    }

    #[test]
    fn registered_members_come_first_and_skip_self() {
        let out = expand(quote! {
            #[reflect(shared(name = "a", path = crate::ONE))]
            #[reflect(constant(name = "on", value = Self::ON))]
            struct S { b: f64 }
        });
        assert!(out.contains("::prism::Member::new(\"a\",::prism::MemberKind::Ref"));
        assert!(out.contains("||::prism::shape_of_val(&crate::ONE)"));
        assert!(out.contains("0=>{letvalue:&'static_=&crate::ONE;"));
        assert!(out.contains("1=>::core::option::Option::Some(const{&Self::ON}),"));
        assert!(out.contains("2=>::core::option::Option::Some(&self.b)"));
    }

    #[test]
    fn type_params_gain_a_reflect_bound() {
        let out = expand(quote! {
            struct Wrap<T> where T: Clone { inner: T }
        });
        assert!(out.contains("whereT:Clone,T:::prism::Reflect"));
    }

    #[test]
    fn unions_produce_compile_errors() {
        let out = expand(quote! { union U { a: u8 } });
        assert!(out.contains("compile_error!"));
    }
}
