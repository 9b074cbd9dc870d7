//! Turns derive input into a [`ParsedStruct`].
//!
//! The header (attributes, visibility, `struct`, name) and attribute contents
//! go through the unsynn grammar below. Generics, where clauses, field lists
//! and nested attribute arguments are split by hand on top-level commas,
//! since types and paths may contain commas inside angle brackets.

use proc_macro2::{Delimiter, Literal, Spacing, Span, TokenStream, TokenTree};
use unsynn::*;

keyword! {
    KStruct = "struct";
    KPub = "pub";
    KReflect = "reflect";
    KDoc = "doc";
}

operator! {
    Equals = "=";
}

unsynn! {
    enum Vis {
        PubIn(Cons<KPub, ParenthesisGroup>),
        Pub(KPub),
    }

    struct Attribute {
        _pound: Pound,
        content: BracketGroup,
    }

    struct StructHeader {
        attrs: Vec<Attribute>,
        _vis: Option<Vis>,
        _kw_struct: KStruct,
        name: Ident,
        rest: Vec<TokenTree>,
    }

    struct NamedField {
        attrs: Vec<Attribute>,
        _vis: Option<Vis>,
        name: Ident,
        _colon: Colon,
        ty: Vec<TokenTree>,
    }

    struct TupleField {
        attrs: Vec<Attribute>,
        _vis: Option<Vis>,
        ty: Vec<TokenTree>,
    }

    // `///` comments arrive as raw strings, so any literal is taken here
    struct DocAttr {
        _doc: KDoc,
        _eq: Equals,
        text: Literal,
    }

    struct ReflectAttr {
        _reflect: KReflect,
        args: ParenthesisGroupContaining<CommaDelimitedVec<AttrArg>>,
    }

    struct AttrArg {
        key: Ident,
        value: Option<ArgValue>,
    }

    enum ArgValue {
        Assign(Cons<Equals, Literal>),
        Nested(ParenthesisGroup),
    }
}

/// A derive error, reported as `compile_error!` at `span`.
pub(crate) struct ParseError {
    pub msg: String,
    pub span: Span,
}

impl ParseError {
    fn new(msg: impl Into<String>, span: Span) -> Self {
        Self {
            msg: msg.into(),
            span,
        }
    }
}

type ParseResult<T> = std::result::Result<T, ParseError>;

pub(crate) struct ParsedStruct {
    pub name: Ident,
    /// Literal used as the shape's type identifier
    pub type_identifier: TokenStream,
    pub doc: Vec<TokenStream>,
    /// Members registered on the container, rendered before the fields
    pub statics: Vec<StaticMember>,
    pub generics: Generics,
    pub kind: BodyKind,
    pub fields: Vec<ParsedField>,
}

/// A member with no per-instance storage: `#[reflect(shared(..))]` or
/// `#[reflect(constant(..))]` on the container.
pub(crate) struct StaticMember {
    /// String literal
    pub name: TokenStream,
    /// [`FieldKind::Ref`] or [`FieldKind::Const`]
    pub kind: FieldKind,
    /// The static's path, or the constant expression
    pub source: TokenStream,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum BodyKind {
    Named,
    Tuple,
    Unit,
}

#[derive(Default)]
pub(crate) struct Generics {
    pub params: Vec<GenericParam>,
    pub predicates: Vec<TokenStream>,
}

pub(crate) struct GenericParam {
    pub kind: ParamKind,
    /// `'a`, `T`, `N`
    pub name: TokenStream,
    /// The declaration without its default: `T: Clone`, `const N: usize`
    pub decl: TokenStream,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum ParamKind {
    Lifetime,
    Type,
    Const,
}

pub(crate) struct ParsedField {
    /// `self.<access>`: an identifier or a tuple index
    pub access: TokenStream,
    pub ty: TokenStream,
    pub doc: Vec<TokenStream>,
    pub rename: Option<TokenStream>,
    pub kind: FieldKind,
    pub skip: bool,
    /// Name used when nothing else decides: the field ident or its index
    pub default_name: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum FieldKind {
    Value,
    Base,
    BaseInline,
    Ref,
    Const,
}

impl FieldKind {
    pub(crate) fn variant(self) -> &'static str {
        match self {
            FieldKind::Value => "Value",
            FieldKind::Base => "Base",
            FieldKind::BaseInline => "BaseInline",
            FieldKind::Ref => "Ref",
            FieldKind::Const => "Const",
        }
    }
}

pub(crate) fn parse_struct(input: TokenStream) -> ParseResult<ParsedStruct> {
    let first_span = input
        .clone()
        .into_iter()
        .next()
        .map(|t| t.span())
        .unwrap_or_else(Span::call_site);
    let mut iter = input.to_token_iter();
    let header = iter.parse::<StructHeader>().map_err(|_| {
        ParseError::new(
            "#[derive(Reflect)] only supports structs (enums and unions have no member list)",
            first_span,
        )
    })?;

    let mut rename = None;
    let mut statics = Vec::new();
    for attr in &header.attrs {
        for arg in reflect_args(attr)? {
            match arg.key.to_string().as_str() {
                "rename" => rename = Some(required_value(&arg)?),
                "shared" => statics.push(static_member(&arg, FieldKind::Ref, "path")?),
                "constant" => statics.push(static_member(&arg, FieldKind::Const, "value")?),
                other => {
                    return Err(ParseError::new(
                        format!(
                            "unknown container attribute `{other}`, expected one of \
                             `rename`, `shared`, `constant`"
                        ),
                        arg.key.span(),
                    ));
                }
            }
        }
    }

    let name = header.name;
    let type_identifier =
        rename.unwrap_or_else(|| literal(Literal::string(&unraw(&name.to_string()))));
    let doc = doc_lines(&header.attrs);

    let (generics, kind, fields) = parse_rest(header.rest, name.span())?;

    Ok(ParsedStruct {
        name,
        type_identifier,
        doc,
        statics,
        generics,
        kind,
        fields,
    })
}

/// Splits what follows the struct name into generics, where clause and body.
fn parse_rest(
    rest: Vec<TokenTree>,
    name_span: Span,
) -> ParseResult<(Generics, BodyKind, Vec<ParsedField>)> {
    let mut rest = rest.as_slice();
    let mut generics = Generics::default();

    if is_punct(rest.first(), '<') {
        let close = matching_angle(rest)
            .ok_or_else(|| ParseError::new("unterminated generic parameter list", name_span))?;
        for chunk in split_top_level(&rest[1..close], ',') {
            generics.params.push(parse_param(chunk));
        }
        rest = &rest[close + 1..];
    }

    match rest {
        [TokenTree::Group(g), tail @ ..] if g.delimiter() == Delimiter::Parenthesis => {
            // tuple struct: `(..) where ..;`
            let tail = match tail.split_last() {
                Some((last, before)) if is_punct(Some(last), ';') => before,
                _ => tail,
            };
            generics.predicates = parse_where(tail);
            let fields = split_top_level(&g.stream().into_iter().collect::<Vec<_>>(), ',')
                .into_iter()
                .enumerate()
                .map(|(index, chunk)| parse_tuple_field(index, chunk))
                .collect::<ParseResult<Vec<_>>>()?;
            Ok((generics, BodyKind::Tuple, fields))
        }
        [before @ .., TokenTree::Group(g)] if g.delimiter() == Delimiter::Brace => {
            generics.predicates = parse_where(before);
            let fields = split_top_level(&g.stream().into_iter().collect::<Vec<_>>(), ',')
                .into_iter()
                .map(parse_named_field)
                .collect::<ParseResult<Vec<_>>>()?;
            Ok((generics, BodyKind::Named, fields))
        }
        [before @ .., last] if is_punct(Some(last), ';') => {
            generics.predicates = parse_where(before);
            Ok((generics, BodyKind::Unit, Vec::new()))
        }
        _ => Err(ParseError::new("unsupported struct body", name_span)),
    }
}

fn parse_named_field(chunk: Vec<TokenTree>) -> ParseResult<ParsedField> {
    let span = chunk.first().map(|t| t.span()).unwrap_or_else(Span::call_site);
    let stream: TokenStream = chunk.into_iter().collect();
    let field = stream
        .to_token_iter()
        .parse::<NamedField>()
        .map_err(|_| ParseError::new("could not parse this field", span))?;
    let default_name = unraw(&field.name.to_string());
    let access = TokenStream::from(TokenTree::Ident(field.name.clone()));
    build_field(&field.attrs, access, field.ty, default_name)
}

fn parse_tuple_field(index: usize, chunk: Vec<TokenTree>) -> ParseResult<ParsedField> {
    let span = chunk.first().map(|t| t.span()).unwrap_or_else(Span::call_site);
    let stream: TokenStream = chunk.into_iter().collect();
    let field = stream
        .to_token_iter()
        .parse::<TupleField>()
        .map_err(|_| ParseError::new("could not parse this field", span))?;
    let access = literal(Literal::usize_unsuffixed(index));
    build_field(&field.attrs, access, field.ty, index.to_string())
}

fn build_field(
    attrs: &[Attribute],
    access: TokenStream,
    ty: Vec<TokenTree>,
    default_name: String,
) -> ParseResult<ParsedField> {
    let mut field = ParsedField {
        access,
        ty: ty.into_iter().collect(),
        doc: doc_lines(attrs),
        rename: None,
        kind: FieldKind::Value,
        skip: false,
        default_name,
    };

    for attr in attrs {
        for arg in reflect_args(attr)? {
            let key = arg.key.to_string();
            let kind = match key.as_str() {
                "rename" => {
                    field.rename = Some(required_value(&arg)?);
                    continue;
                }
                "skip" => {
                    field.skip = true;
                    continue;
                }
                "base" => FieldKind::Base,
                "base_inline" | "flatten" => FieldKind::BaseInline,
                "shared" | "constant" => {
                    return Err(ParseError::new(
                        format!(
                            "`{key}` members have no per-instance storage; declare them on \
                             the struct: #[reflect({key}(name = \"..\", ..))]"
                        ),
                        arg.key.span(),
                    ));
                }
                other => {
                    return Err(ParseError::new(
                        format!(
                            "unknown field attribute `{other}`, expected one of \
                             `rename`, `skip`, `base`, `base_inline`, `flatten`"
                        ),
                        arg.key.span(),
                    ));
                }
            };
            if field.kind != FieldKind::Value {
                return Err(ParseError::new(
                    format!("`{key}` conflicts with an earlier member kind attribute"),
                    arg.key.span(),
                ));
            }
            field.kind = kind;
        }
    }

    if field.kind == FieldKind::BaseInline && field.rename.is_some() {
        return Err(ParseError::new(
            "an inlined base has no name of its own; drop `rename`",
            Span::call_site(),
        ));
    }

    Ok(field)
}

/// The `key [= "value"]` pairs of a `#[reflect(...)]` attribute; empty for
/// any other attribute.
fn reflect_args(attr: &Attribute) -> ParseResult<Vec<AttrArg>> {
    let content = attr.content.0.stream();
    let is_reflect = matches!(
        content.clone().into_iter().next(),
        Some(TokenTree::Ident(ident)) if ident == "reflect"
    );
    if !is_reflect {
        return Ok(Vec::new());
    }
    let span = attr.content.0.span();
    let parsed = content
        .to_token_iter()
        .parse::<ReflectAttr>()
        .map_err(|_| ParseError::new("expected #[reflect(key, key = \"value\", ...)]", span))?;
    Ok(parsed
        .args
        .content
        .into_iter()
        .map(|delimited| delimited.value)
        .collect())
}

fn required_value(arg: &AttrArg) -> ParseResult<TokenStream> {
    match &arg.value {
        Some(ArgValue::Assign(assign)) if is_string_literal(&assign.second) => {
            Ok(literal(assign.second.clone()))
        }
        _ => Err(ParseError::new(
            format!("`{}` needs a string value", arg.key),
            arg.key.span(),
        )),
    }
}

/// `shared(name = "..", path = ..)` or `constant(name = "..", value = ..)`.
fn static_member(arg: &AttrArg, kind: FieldKind, source_key: &str) -> ParseResult<StaticMember> {
    let key = arg.key.to_string();
    let usage = format!("expected #[reflect({key}(name = \"..\", {source_key} = ..))]");
    let Some(ArgValue::Nested(group)) = &arg.value else {
        return Err(ParseError::new(usage, arg.key.span()));
    };

    let mut name = None;
    let mut source = None;
    let tokens: Vec<TokenTree> = group.0.stream().into_iter().collect();
    for chunk in split_top_level(&tokens, ',') {
        let (inner_key, value) = match chunk.as_slice() {
            [TokenTree::Ident(inner_key), eq, value @ ..]
                if is_punct(Some(eq), '=') && !value.is_empty() =>
            {
                (inner_key, value)
            }
            _ => return Err(ParseError::new(usage, group.0.span())),
        };
        if inner_key == "name" {
            match value {
                [TokenTree::Literal(lit)] if is_string_literal(lit) => {
                    name = Some(literal(lit.clone()));
                }
                _ => {
                    return Err(ParseError::new(
                        "`name` needs a string value",
                        inner_key.span(),
                    ));
                }
            }
        } else if *inner_key == source_key {
            source = Some(value.iter().cloned().collect::<TokenStream>());
        } else {
            return Err(ParseError::new(
                format!("unknown argument `{inner_key}`, {usage}"),
                inner_key.span(),
            ));
        }
    }

    match (name, source) {
        (Some(name), Some(source)) => Ok(StaticMember { name, kind, source }),
        _ => Err(ParseError::new(usage, group.0.span())),
    }
}

/// Literals of every `#[doc = "..."]` attribute, in order, raw or cooked.
fn doc_lines(attrs: &[Attribute]) -> Vec<TokenStream> {
    attrs
        .iter()
        .filter_map(|attr| {
            attr.content
                .0
                .stream()
                .to_token_iter()
                .parse::<DocAttr>()
                .ok()
                .filter(|doc| is_string_literal(&doc.text))
                .map(|doc| literal(doc.text))
        })
        .collect()
}

/// `"..."`, `r"..."` or `r#"..."#`.
fn is_string_literal(lit: &Literal) -> bool {
    let text = lit.to_string();
    text.starts_with('"') || text.starts_with("r\"") || text.starts_with("r#")
}

fn parse_param(chunk: Vec<TokenTree>) -> GenericParam {
    let decl = strip_default(&chunk);
    match chunk.as_slice() {
        [TokenTree::Punct(p), lifetime, ..] if p.as_char() == '\'' => GenericParam {
            kind: ParamKind::Lifetime,
            name: [TokenTree::Punct(p.clone()), lifetime.clone()]
                .into_iter()
                .collect(),
            decl,
        },
        [TokenTree::Ident(kw), name, ..] if kw == "const" => GenericParam {
            kind: ParamKind::Const,
            name: TokenStream::from(name.clone()),
            decl,
        },
        [name, ..] => GenericParam {
            kind: ParamKind::Type,
            name: TokenStream::from(name.clone()),
            decl,
        },
        [] => GenericParam {
            kind: ParamKind::Type,
            name: TokenStream::new(),
            decl,
        },
    }
}

/// Drops a `= default` suffix from a generic parameter declaration.
fn strip_default(chunk: &[TokenTree]) -> TokenStream {
    split_top_level(chunk, '=')
        .into_iter()
        .next()
        .unwrap_or_default()
        .into_iter()
        .collect()
}

/// Predicates of a `where` clause, or nothing if `tokens` holds none.
fn parse_where(tokens: &[TokenTree]) -> Vec<TokenStream> {
    match tokens.split_first() {
        Some((TokenTree::Ident(kw), predicates)) if kw == "where" => {
            split_top_level(predicates, ',')
                .into_iter()
                .map(|chunk| chunk.into_iter().collect())
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Splits `tokens` on `sep` wherever it isn't nested in angle brackets.
/// Empty pieces (from trailing separators) are dropped.
pub(crate) fn split_top_level(tokens: &[TokenTree], sep: char) -> Vec<Vec<TokenTree>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    let mut depth = 0usize;
    let mut after_dash = false;

    for tt in tokens {
        if let TokenTree::Punct(p) = tt {
            let c = p.as_char();
            if c == sep && depth == 0 {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                after_dash = false;
                continue;
            }
            match c {
                '<' => depth += 1,
                // `->` in `Fn(A) -> B` bounds isn't a closing bracket
                '>' if !after_dash => depth = depth.saturating_sub(1),
                _ => {}
            }
            after_dash = c == '-' && p.spacing() == Spacing::Joint;
        } else {
            after_dash = false;
        }
        current.push(tt.clone());
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Index of the `>` closing the `<` at `tokens[0]`.
fn matching_angle(tokens: &[TokenTree]) -> Option<usize> {
    let mut depth = 0usize;
    let mut after_dash = false;
    for (index, tt) in tokens.iter().enumerate() {
        let TokenTree::Punct(p) = tt else {
            after_dash = false;
            continue;
        };
        match p.as_char() {
            '<' => depth += 1,
            '>' if !after_dash => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
        after_dash = p.as_char() == '-' && p.spacing() == Spacing::Joint;
    }
    None
}

fn is_punct(tt: Option<&TokenTree>, c: char) -> bool {
    matches!(tt, Some(TokenTree::Punct(p)) if p.as_char() == c)
}

fn literal(lit: Literal) -> TokenStream {
    TokenStream::from(TokenTree::Literal(lit))
}

fn unraw(ident: &str) -> String {
    ident.strip_prefix("r#").unwrap_or(ident).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_testhelpers::test;
    use quote::quote;

    fn compact(tokens: &TokenStream) -> String {
        tokens.to_string().replace(' ', "")
    }

    fn parse(input: TokenStream) -> ParsedStruct {
        match parse_struct(input) {
            Ok(parsed) => parsed,
            Err(err) => panic!("parse failed: {}", err.msg),
        }
    }

    #[test]
    fn named_fields_with_generic_types() {
        let parsed = parse(quote! {
            /// A thing.
            pub struct Thing {
                pub a: HashMap<String, u32>,
                #[reflect(rename = "bee")]
                b: Vec<(u8, u8)>,
            }
        });
        assert_eq!(parsed.kind, BodyKind::Named);
        assert_eq!(parsed.fields.len(), 2);
        assert_eq!(compact(&parsed.fields[0].ty), "HashMap<String,u32>");
        assert_eq!(parsed.fields[1].rename.as_ref().map(compact).as_deref(), Some("\"bee\""));
        assert_eq!(parsed.doc.len(), 1);
    }

    #[test]
    fn tuple_and_unit_structs() {
        let parsed = parse(quote! { struct Pair(pub u8, #[reflect(skip)] String); });
        assert_eq!(parsed.kind, BodyKind::Tuple);
        assert_eq!(parsed.fields[0].default_name, "0");
        assert!(parsed.fields[1].skip);

        let parsed = parse(quote! { struct Marker; });
        assert_eq!(parsed.kind, BodyKind::Unit);
        assert!(parsed.fields.is_empty());
    }

    #[test]
    fn generics_and_where_clauses() {
        let parsed = parse(quote! {
            struct Wrapper<'a, T: Clone = u8, const N: usize = 3>
            where
                T: Default,
            {
                items: &'a [T; N],
            }
        });
        let kinds: Vec<_> = parsed.generics.params.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, [ParamKind::Lifetime, ParamKind::Type, ParamKind::Const]);
        assert_eq!(compact(&parsed.generics.params[1].decl), "T:Clone");
        assert_eq!(compact(&parsed.generics.params[2].name), "N");
        assert_eq!(parsed.generics.predicates.len(), 1);
    }

    #[test]
    fn member_kinds() {
        let parsed = parse(quote! {
            struct Kinds {
                #[reflect(base)] a: A,
                #[reflect(flatten)] b: B,
                c: u32,
            }
        });
        let kinds: Vec<_> = parsed.fields.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, [FieldKind::Base, FieldKind::BaseInline, FieldKind::Value]);
    }

    #[test]
    fn raw_string_docs_are_kept() {
        let parsed = parse(quote! {
            #[doc = r"raw"]
            #[doc = r#"with "quotes""#]
            struct Documented {
                #[doc = "cooked"]
                a: u8,
            }
        });
        assert_eq!(parsed.doc.len(), 2);
        assert_eq!(compact(&parsed.doc[1]), r###"r#"with"quotes""#"###);
        assert_eq!(parsed.fields[0].doc.len(), 1);
    }

    #[test]
    fn registered_members_on_the_container() {
        let parsed = parse(quote! {
            #[reflect(shared(name = "limit", path = crate::LIMITS::MAX))]
            #[reflect(constant(name = "enabled", value = Self::ENABLED), rename = "Cfg")]
            struct Config {
                b: f64,
            }
        });
        assert_eq!(parsed.statics.len(), 2);
        assert_eq!(parsed.statics[0].kind, FieldKind::Ref);
        assert_eq!(compact(&parsed.statics[0].name), "\"limit\"");
        assert_eq!(compact(&parsed.statics[0].source), "crate::LIMITS::MAX");
        assert_eq!(parsed.statics[1].kind, FieldKind::Const);
        assert_eq!(compact(&parsed.statics[1].source), "Self::ENABLED");
        assert_eq!(compact(&parsed.type_identifier), "\"Cfg\"");
        assert_eq!(parsed.fields.len(), 1);
    }

    #[test]
    fn registered_members_need_a_name_and_a_source() {
        for input in [
            quote! { #[reflect(shared)] struct S; },
            quote! { #[reflect(shared(name = "a"))] struct S; },
            quote! { #[reflect(constant(name = 1, value = 2))] struct S; },
            quote! { #[reflect(constant(name = "a", path = X))] struct S; },
        ] {
            let err = parse_struct(input).err().map(|e| e.msg);
            assert!(err.is_some(), "registered member should have been rejected");
        }
    }

    #[test]
    fn per_instance_shared_fields_are_rejected() {
        let err = parse_struct(quote! { struct S { #[reflect(shared)] a: &'static u8 } })
            .err()
            .map(|e| e.msg);
        assert!(err.is_some_and(|msg| msg.contains("no per-instance storage")));
    }

    #[test]
    fn enums_are_rejected() {
        let err = parse_struct(quote! { enum E { A } }).err().map(|e| e.msg);
        assert!(err.is_some_and(|msg| msg.contains("only supports structs")));
    }

    #[test]
    fn unknown_attributes_are_rejected() {
        let err = parse_struct(quote! { struct S { #[reflect(bogus)] a: u8 } })
            .err()
            .map(|e| e.msg);
        assert!(err.is_some_and(|msg| msg.contains("unknown field attribute `bogus`")));
    }

    #[test]
    fn arrows_do_not_close_brackets() {
        let tokens: Vec<TokenTree> = quote! { F: Fn(u8) -> Vec<u8>, G }.into_iter().collect();
        assert_eq!(split_top_level(&tokens, ',').len(), 2);
    }
}
