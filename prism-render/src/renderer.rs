use std::fmt::Debug;

use prism_core::PeekScalar;

/// What to do with a pointer that holds no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbsentPolicy {
    /// Emit nothing, not even the field key or array slot (default).
    #[default]
    Skip,
    /// Emit the field key or array slot followed by [`Renderer::absent`].
    Null,
}

/// Order in which map entries are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapOrder {
    /// The container's own iteration order (default).
    #[default]
    Source,
    /// Ascending by the key's string form.
    Sorted,
}

/// Emission primitives implemented by each output format.
///
/// The traversal owns every structural decision (which category a value is,
/// how to walk it, when to skip it); a renderer only decides how each event
/// is represented. Events arrive well nested: every `begin_*` is matched by
/// the corresponding `end_*`, and inside an object each value is preceded by
/// exactly one `field_key`.
pub trait Renderer {
    /// Format-specific error type.
    type Error: Debug;

    /// Opens an object.
    fn begin_object(&mut self) -> Result<(), Self::Error>;

    /// Announces the key of the next value in the current object.
    fn field_key(&mut self, key: &str) -> Result<(), Self::Error>;

    /// Closes the innermost object.
    fn end_object(&mut self) -> Result<(), Self::Error>;

    /// Opens an array.
    fn begin_array(&mut self) -> Result<(), Self::Error>;

    /// Announces the next value in the current array, with its position in
    /// the source sequence.
    ///
    /// Skipped absent elements are never announced, so positions may have
    /// gaps.
    fn array_slot(&mut self, _index: usize) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Closes the innermost array.
    fn end_array(&mut self) -> Result<(), Self::Error>;

    /// Emits a leaf value.
    fn scalar(&mut self, scalar: PeekScalar<'_>) -> Result<(), Self::Error>;

    /// Emits the explicit marker for a value that isn't there.
    fn absent(&mut self) -> Result<(), Self::Error> {
        self.scalar(PeekScalar::null())
    }

    /// How absent values should be handled.
    fn absent_policy(&self) -> AbsentPolicy {
        AbsentPolicy::Skip
    }

    /// In which order map entries should be visited.
    fn map_order(&self) -> MapOrder {
        MapOrder::Source
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    type Error = R::Error;

    fn begin_object(&mut self) -> Result<(), Self::Error> {
        (**self).begin_object()
    }

    fn field_key(&mut self, key: &str) -> Result<(), Self::Error> {
        (**self).field_key(key)
    }

    fn end_object(&mut self) -> Result<(), Self::Error> {
        (**self).end_object()
    }

    fn begin_array(&mut self) -> Result<(), Self::Error> {
        (**self).begin_array()
    }

    fn array_slot(&mut self, index: usize) -> Result<(), Self::Error> {
        (**self).array_slot(index)
    }

    fn end_array(&mut self) -> Result<(), Self::Error> {
        (**self).end_array()
    }

    fn scalar(&mut self, scalar: PeekScalar<'_>) -> Result<(), Self::Error> {
        (**self).scalar(scalar)
    }

    fn absent(&mut self) -> Result<(), Self::Error> {
        (**self).absent()
    }

    fn absent_policy(&self) -> AbsentPolicy {
        (**self).absent_policy()
    }

    fn map_order(&self) -> MapOrder {
        (**self).map_order()
    }
}
