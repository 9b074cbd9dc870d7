use std::borrow::Cow;

use prism_core::{
    ArrayLayout, MemberKind, ObjectLayout, Peek, PeekEntry, PeekMap, PeekStruct, Reflect,
};

use crate::{MapOrder, ObjectScope, RenderError, Renderer, RootKind, Slot};

/// Renders `value`, whatever it is.
///
/// An absent root (`None`, a dangling `Weak`) goes to [`Renderer::absent`].
pub fn render<R, T>(renderer: &mut R, value: &T) -> Result<(), RenderError<R::Error>>
where
    R: Renderer + ?Sized,
    T: Reflect + ?Sized,
{
    debug!(shape = %T::SHAPE, "render");
    render_peek(Slot::root(renderer, RootKind::Any), value.peek())
}

/// Renders `value`, which must render as an object. An absent root renders
/// as an empty object.
///
/// Anything else is rejected at compile time:
///
/// ```compile_fail
/// # struct Nothing;
/// # impl prism_render::Renderer for Nothing {
/// #     type Error = ();
/// #     fn begin_object(&mut self) -> Result<(), ()> { Ok(()) }
/// #     fn field_key(&mut self, _: &str) -> Result<(), ()> { Ok(()) }
/// #     fn end_object(&mut self) -> Result<(), ()> { Ok(()) }
/// #     fn begin_array(&mut self) -> Result<(), ()> { Ok(()) }
/// #     fn end_array(&mut self) -> Result<(), ()> { Ok(()) }
/// #     fn scalar(&mut self, _: prism_core::PeekScalar<'_>) -> Result<(), ()> { Ok(()) }
/// # }
/// prism_render::render_object(&mut Nothing, &vec![1, 2, 3]).ok();
/// ```
pub fn render_object<R, T>(renderer: &mut R, value: &T) -> Result<(), RenderError<R::Error>>
where
    R: Renderer + ?Sized,
    T: Reflect<Layout = ObjectLayout> + ?Sized,
{
    debug!(shape = %T::SHAPE, "render object");
    render_peek(Slot::root(renderer, RootKind::Object), value.peek())
}

/// Renders `value`, which must render as an array. An absent root renders as
/// an empty array.
///
/// Anything else is rejected at compile time:
///
/// ```compile_fail
/// # struct Nothing;
/// # impl prism_render::Renderer for Nothing {
/// #     type Error = ();
/// #     fn begin_object(&mut self) -> Result<(), ()> { Ok(()) }
/// #     fn field_key(&mut self, _: &str) -> Result<(), ()> { Ok(()) }
/// #     fn end_object(&mut self) -> Result<(), ()> { Ok(()) }
/// #     fn begin_array(&mut self) -> Result<(), ()> { Ok(()) }
/// #     fn end_array(&mut self) -> Result<(), ()> { Ok(()) }
/// #     fn scalar(&mut self, _: prism_core::PeekScalar<'_>) -> Result<(), ()> { Ok(()) }
/// # }
/// let map = std::collections::BTreeMap::from([("a", 1)]);
/// prism_render::render_array(&mut Nothing, &map).ok();
/// ```
pub fn render_array<R, T>(renderer: &mut R, value: &T) -> Result<(), RenderError<R::Error>>
where
    R: Renderer + ?Sized,
    T: Reflect<Layout = ArrayLayout> + ?Sized,
{
    debug!(shape = %T::SHAPE, "render array");
    render_peek(Slot::root(renderer, RootKind::Array), value.peek())
}

/// Renders a runtime view into `slot`, recursing into whatever it contains.
pub fn render_peek<R>(slot: Slot<'_, R>, peek: Peek<'_>) -> Result<(), RenderError<R::Error>>
where
    R: Renderer + ?Sized,
{
    match peek {
        Peek::Scalar(scalar) => slot.scalar(scalar),
        Peek::Pointer(ptr) => match ptr.pointee() {
            Some(pointee) => render_peek(slot, pointee.dyn_peek()),
            None => slot.absent(),
        },
        Peek::List(list) => {
            let mut array = slot.begin_array()?;
            for item in list {
                render_peek(array.item(), item.dyn_peek())?;
            }
            array.end()
        }
        Peek::Map(map) => {
            let mut object = slot.begin_object()?;
            render_entries(&mut object, map)?;
            object.end()
        }
        Peek::Struct(st) => {
            let mut object = slot.begin_object()?;
            if has_inlined_members(&st) {
                object.track_keys();
            }
            for index in 0..st.len() {
                render_member(&mut object, &st, index)?;
            }
            object.end()
        }
    }
}

/// Renders the member at `index` of `st` into `scope`.
///
/// Most members get a field named after them. An inlined base instead has
/// its own members (or entries, for a map) spliced into `scope`, looking
/// through pointers; an absent one contributes nothing. Within an object
/// that has inlined members, a key produced twice is
/// [`RenderError::DuplicateKey`].
pub fn render_member<R>(
    scope: &mut ObjectScope<'_, R>,
    st: &PeekStruct<'_>,
    index: usize,
) -> Result<(), RenderError<R::Error>>
where
    R: Renderer + ?Sized,
{
    let (member, value) = st.member(index).ok_or_else(|| {
        RenderError::Internal(Cow::Owned(format!(
            "{} has no accessible member at index {index}",
            st.shape()
        )))
    })?;
    trace!(name = member.name, kind = ?member.kind, "member");

    match member.kind {
        MemberKind::BaseInline => splice(scope, value.dyn_peek()),
        MemberKind::Value | MemberKind::Base | MemberKind::Ref | MemberKind::Const => {
            scope.claim(member.name)?;
            render_peek(scope.field(member.name), value.dyn_peek())
        }
    }
}

fn has_inlined_members(st: &PeekStruct<'_>) -> bool {
    st.shape()
        .as_struct()
        .is_some_and(|ty| ty.members.iter().any(|m| m.kind == MemberKind::BaseInline))
}

fn splice<R>(scope: &mut ObjectScope<'_, R>, peek: Peek<'_>) -> Result<(), RenderError<R::Error>>
where
    R: Renderer + ?Sized,
{
    match peek {
        Peek::Struct(st) => {
            // keys spliced from here on must not repeat earlier ones
            scope.track_keys();
            for index in 0..st.len() {
                render_member(scope, &st, index)?;
            }
            Ok(())
        }
        Peek::Map(map) => {
            scope.track_keys();
            render_entries(scope, map)
        }
        Peek::Pointer(ptr) => match ptr.pointee() {
            Some(pointee) => splice(scope, pointee.dyn_peek()),
            None => {
                trace!("absent inlined base");
                Ok(())
            }
        },
        other @ (Peek::Scalar(_) | Peek::List(_)) => Err(RenderError::Internal(Cow::Owned(
            format!("cannot inline a {} into an object", other.kind_name()),
        ))),
    }
}

fn render_entries<R>(
    scope: &mut ObjectScope<'_, R>,
    map: PeekMap<'_>,
) -> Result<(), RenderError<R::Error>>
where
    R: Renderer + ?Sized,
{
    match scope.map_order() {
        MapOrder::Source => {
            for (key, value) in map {
                scope.claim(&key)?;
                render_peek(scope.field(&key), value.dyn_peek())?;
            }
        }
        MapOrder::Sorted => {
            let mut entries: Vec<PeekEntry<'_>> = map.collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            for (key, value) in entries {
                scope.claim(&key)?;
                render_peek(scope.field(&key), value.dyn_peek())?;
            }
        }
    }
    Ok(())
}
