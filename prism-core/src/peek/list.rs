use alloc::boxed::Box;

use crate::DynReflect;

/// A view of a sequence: its length and an iterator over its elements, in
/// the container's iteration order.
pub struct PeekList<'a> {
    len: usize,
    iter: Box<dyn Iterator<Item = &'a dyn DynReflect> + 'a>,
}

impl<'a> PeekList<'a> {
    /// Wraps an element iterator yielding exactly `len` items.
    pub fn new<I>(len: usize, iter: I) -> Self
    where
        I: Iterator<Item = &'a dyn DynReflect> + 'a,
    {
        Self {
            len,
            iter: Box::new(iter),
        }
    }

    /// Number of elements still to be yielded.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no elements are left.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<'a> Iterator for PeekList<'a> {
    type Item = &'a dyn DynReflect;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;
        self.len = self.len.saturating_sub(1);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}
