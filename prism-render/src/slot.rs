use std::collections::BTreeSet;

use prism_core::PeekScalar;

use crate::{AbsentPolicy, MapOrder, RenderError, Renderer};

/// Which entry point a traversal started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// [`crate::render`]: anything goes.
    Any,
    /// [`crate::render_object`]: the root renders as an object.
    Object,
    /// [`crate::render_array`]: the root renders as an array.
    Array,
}

/// Where the value being rendered sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context<'k> {
    /// Top of the traversal
    Root(RootKind),
    /// Named field of an object (struct member or map entry)
    Field(&'k str),
    /// Position in an array
    Item(usize),
}

/// A place for exactly one value.
///
/// Consumed by whatever the value turns out to be. The field key or array
/// slot is only announced to the renderer once something is emitted, so a
/// skipped value leaves nothing behind.
pub struct Slot<'s, R: Renderer + ?Sized> {
    renderer: &'s mut R,
    context: Context<'s>,
}

impl<'s, R: Renderer + ?Sized> Slot<'s, R> {
    /// A root slot.
    pub fn root(renderer: &'s mut R, kind: RootKind) -> Self {
        Self {
            renderer,
            context: Context::Root(kind),
        }
    }

    /// Where this slot sits.
    pub fn context(&self) -> Context<'s> {
        self.context
    }

    fn bind(&mut self) -> Result<(), RenderError<R::Error>> {
        match self.context {
            Context::Root(_) => Ok(()),
            Context::Field(key) => self.renderer.field_key(key).map_err(RenderError::Backend),
            Context::Item(index) => self.renderer.array_slot(index).map_err(RenderError::Backend),
        }
    }

    /// Fills the slot with a leaf value.
    pub fn scalar(mut self, scalar: PeekScalar<'_>) -> Result<(), RenderError<R::Error>> {
        self.bind()?;
        self.renderer.scalar(scalar).map_err(RenderError::Backend)
    }

    /// Fills the slot with a value that isn't there.
    ///
    /// A root stays well-formed: an object or array root becomes empty, any
    /// other root gets [`Renderer::absent`]. Elsewhere the renderer's
    /// [`AbsentPolicy`] decides.
    pub fn absent(mut self) -> Result<(), RenderError<R::Error>> {
        let context = self.context;
        match context {
            Context::Root(RootKind::Object) => self.begin_object()?.end(),
            Context::Root(RootKind::Array) => self.begin_array()?.end(),
            Context::Root(RootKind::Any) => self.renderer.absent().map_err(RenderError::Backend),
            Context::Field(_) | Context::Item(_) => match self.renderer.absent_policy() {
                AbsentPolicy::Skip => {
                    trace!(?context, "skipping absent value");
                    Ok(())
                }
                AbsentPolicy::Null => {
                    self.bind()?;
                    self.renderer.absent().map_err(RenderError::Backend)
                }
            },
        }
    }

    /// Fills the slot with an object, whose members go into the returned scope.
    pub fn begin_object(mut self) -> Result<ObjectScope<'s, R>, RenderError<R::Error>> {
        self.bind()?;
        trace!(context = ?self.context, "begin object");
        self.renderer.begin_object().map_err(RenderError::Backend)?;
        Ok(ObjectScope {
            renderer: self.renderer,
            keys: None,
        })
    }

    /// Fills the slot with an array, whose elements go into the returned scope.
    pub fn begin_array(mut self) -> Result<ArrayScope<'s, R>, RenderError<R::Error>> {
        self.bind()?;
        trace!(context = ?self.context, "begin array");
        self.renderer.begin_array().map_err(RenderError::Backend)?;
        Ok(ArrayScope {
            renderer: self.renderer,
            next: 0,
        })
    }
}

/// An open object. Dropping it without calling [`ObjectScope::end`] leaves
/// the renderer's output unterminated.
#[must_use = "an object scope must be closed with `end`"]
pub struct ObjectScope<'s, R: Renderer + ?Sized> {
    renderer: &'s mut R,
    /// Keys claimed so far, for objects that splice in other members
    keys: Option<BTreeSet<String>>,
}

impl<'s, R: Renderer + ?Sized> ObjectScope<'s, R> {
    /// A slot for the field called `name`.
    pub fn field<'k>(&'k mut self, name: &'k str) -> Slot<'k, R> {
        Slot {
            renderer: &mut *self.renderer,
            context: Context::Field(name),
        }
    }

    /// The renderer's map entry order.
    pub fn map_order(&self) -> MapOrder {
        self.renderer.map_order()
    }

    /// Starts recording claimed keys.
    pub(crate) fn track_keys(&mut self) {
        self.keys.get_or_insert_with(BTreeSet::new);
    }

    /// Records `name` as taken. Fails if a tracking scope already handed it
    /// out, whether or not that field was rendered.
    pub(crate) fn claim(&mut self, name: &str) -> Result<(), RenderError<R::Error>> {
        match &mut self.keys {
            Some(keys) => {
                if !keys.insert(name.to_string()) {
                    Err(RenderError::DuplicateKey(name.to_string()))
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }

    /// Closes the object.
    pub fn end(self) -> Result<(), RenderError<R::Error>> {
        trace!("end object");
        self.renderer.end_object().map_err(RenderError::Backend)
    }
}

/// An open array. Dropping it without calling [`ArrayScope::end`] leaves
/// the renderer's output unterminated.
#[must_use = "an array scope must be closed with `end`"]
pub struct ArrayScope<'s, R: Renderer + ?Sized> {
    renderer: &'s mut R,
    next: usize,
}

impl<'s, R: Renderer + ?Sized> ArrayScope<'s, R> {
    /// A slot for the next element.
    pub fn item(&mut self) -> Slot<'_, R> {
        let index = self.next;
        self.next += 1;
        Slot {
            renderer: &mut *self.renderer,
            context: Context::Item(index),
        }
    }

    /// Number of slots handed out so far.
    pub fn len(&self) -> usize {
        self.next
    }

    /// Whether no slot was handed out yet.
    pub fn is_empty(&self) -> bool {
        self.next == 0
    }

    /// Closes the array.
    pub fn end(self) -> Result<(), RenderError<R::Error>> {
        trace!(len = self.next, "end array");
        self.renderer.end_array().map_err(RenderError::Backend)
    }
}
