use alloc::{borrow::Cow, boxed::Box};

use crate::DynReflect;

/// One map entry: the key's string form and the value.
pub type PeekEntry<'a> = (Cow<'a, str>, &'a dyn DynReflect);

/// A view of a map: its length and an iterator over its entries, in the
/// container's iteration order.
pub struct PeekMap<'a> {
    len: usize,
    iter: Box<dyn Iterator<Item = PeekEntry<'a>> + 'a>,
}

impl<'a> PeekMap<'a> {
    /// Wraps an entry iterator yielding exactly `len` entries.
    pub fn new<I>(len: usize, iter: I) -> Self
    where
        I: Iterator<Item = PeekEntry<'a>> + 'a,
    {
        Self {
            len,
            iter: Box::new(iter),
        }
    }

    /// Number of entries still to be yielded.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no entries are left.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<'a> Iterator for PeekMap<'a> {
    type Item = PeekEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.iter.next()?;
        self.len = self.len.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}
