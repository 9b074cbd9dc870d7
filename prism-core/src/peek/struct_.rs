use crate::{DynReflect, Member, Members, Shape};

/// A view of a composite: its member descriptors, and access to each
/// member's value by index.
#[derive(Clone, Copy)]
pub struct PeekStruct<'a> {
    shape: &'static Shape,
    members: &'static [Member],
    value: &'a dyn Members,
}

impl<'a> PeekStruct<'a> {
    /// Views `value`, described by `shape`.
    ///
    /// A shape that isn't a struct yields a view with no members.
    pub fn new(shape: &'static Shape, value: &'a dyn Members) -> Self {
        let members = match shape.as_struct() {
            Some(st) => st.members,
            None => &[],
        };
        Self {
            shape,
            members,
            value,
        }
    }

    /// Shape of the composite.
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Member descriptors, in declaration order.
    pub fn members(&self) -> &'static [Member] {
        self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether there are no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The descriptor and value of the member at `index`.
    pub fn member(&self, index: usize) -> Option<(&'static Member, &'a dyn DynReflect)> {
        let member = self.members.get(index)?;
        let value = self.value.member(index)?;
        Some((member, value))
    }

    /// Iterates over every member, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static Member, &'a dyn DynReflect)> + '_ {
        (0..self.members.len()).filter_map(move |index| self.member(index))
    }
}
