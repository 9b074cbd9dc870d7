use alloc::vec::Vec;

use super::{Def, Shape, ShapeFn};

/// Member list of a composite type
#[derive(Clone, Copy, Debug)]
pub struct StructType {
    /// the kind of struct (e.g. struct, tuple struct, unit struct)
    pub kind: StructKind,

    /// all members, in declaration order, which is also output order
    pub members: &'static [Member],
}

impl StructType {
    /// Creates a struct type from its kind and members.
    pub const fn new(kind: StructKind, members: &'static [Member]) -> Self {
        Self { kind, members }
    }

    /// Number of declared members, counting each inlined base as one.
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the struct declares no members at all.
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member at `index`, in declaration order.
    pub fn member(&self, index: usize) -> Option<&'static Member> {
        self.members.get(index)
    }

    /// First member with the given (possibly renamed) name.
    pub fn member_named(&self, name: &str) -> Option<&'static Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Members as they appear once rendered: [`MemberKind::BaseInline`]
    /// members are replaced by the members of their (pointed-to) struct,
    /// recursively.
    ///
    /// Inlined maps contribute no entries here since their keys are only
    /// known at runtime.
    pub fn flat_members(&self) -> Vec<&'static Member> {
        let mut out = Vec::with_capacity(self.members.len());
        collect_flat(self.members, &mut out);
        out
    }
}

fn collect_flat(members: &'static [Member], out: &mut Vec<&'static Member>) {
    for member in members {
        if member.kind != MemberKind::BaseInline {
            out.push(member);
            continue;
        }
        if let Def::Struct(inner) = member.shape().innermost().def {
            collect_flat(inner.members, out);
        }
    }
}

/// Describes the kind of struct
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum StructKind {
    /// struct UnitStruct;
    Unit,

    /// struct TupleStruct(T0, T1);
    TupleStruct,

    /// struct S { foo: T0, bar: T1 }
    Struct,
}

/// Describes a member of a composite type
#[derive(Clone, Copy, Debug)]
pub struct Member {
    /// output key for the member (for tuple structs, this is the 0-based index)
    pub name: &'static str,

    /// how the member takes part in traversal
    pub kind: MemberKind,

    /// shape of the member's type
    ///
    /// the layer of indirection allows for cyclic type definitions
    pub shape: ShapeFn,

    /// doc comments
    pub doc: &'static [&'static str],
}

impl Member {
    /// Creates a member with no doc comments.
    pub const fn new(name: &'static str, kind: MemberKind, shape: ShapeFn) -> Self {
        Self {
            name,
            kind,
            shape,
            doc: &[],
        }
    }

    /// Attaches doc comment lines.
    pub const fn with_doc(mut self, doc: &'static [&'static str]) -> Self {
        self.doc = doc;
        self
    }

    /// Returns the shape of the member's type
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }
}

/// How a member takes part in traversal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MemberKind {
    /// A plain field, rendered under its own name.
    Value,

    /// A base composite, rendered as a nested object under its own name.
    ///
    /// Set with `#[reflect(base)]`; the name defaults to the base type's identifier.
    Base,

    /// A base composite whose members are spliced into the enclosing object.
    ///
    /// Set with `#[reflect(base_inline)]` or `#[reflect(flatten)]`.
    BaseInline,

    /// Process-wide storage bound when the type is registered, not held by
    /// any instance; every value of the type renders the same static.
    ///
    /// Set on the container with `#[reflect(shared(name = "..", path = STATIC))]`.
    Ref,

    /// A type-level constant with no per-instance storage.
    ///
    /// Set on the container with `#[reflect(constant(name = "..", value = Self::CONST))]`.
    Const,
}

impl MemberKind {
    /// Whether the member opens its own `name: value` entry (everything but
    /// [`MemberKind::BaseInline`]).
    pub const fn is_named(self) -> bool {
        !matches!(self, MemberKind::BaseInline)
    }
}
