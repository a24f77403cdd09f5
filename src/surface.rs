//! Cell lifecycle adapter shared by every rendering surface
use crate::errors::ReconcilerError;
use crate::registry::ViewRegistry;
use crate::selection::SelectionHandler;
use crate::spacing::{Axis, SizeConstraint};
use crate::types::{Payload, RenderTag, RenderedChild, ViewId, ViewModel, next_view_id};

/// Where a view has been filled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Stack,
    Cell,
    Supplementary,
}

/// A live view that can be configured repeatedly and recycled.
pub trait ReusableView {
    fn configure(&mut self, payload: &Payload);

    /// Called before a recycled view is configured again.
    fn prepare_for_reuse(&mut self) {}

    fn will_be_shown(&mut self, _payload: &Payload) {}

    fn was_hidden(&mut self, _payload: &Payload) {}

    /// Pin the view to the edges of its container.
    fn fill(&mut self, _container: ContainerKind) {}
}

/// Capability set every rendering surface exposes to the diff engine.
pub trait RenderSurface {
    fn children(&self) -> Vec<RenderedChild>;

    /// Realize, configure and append a view for `model`.
    fn create_view(&mut self, model: &ViewModel, registry: &ViewRegistry) -> Result<ViewId, ReconcilerError>;

    fn reconfigure(&mut self, index: usize, model: &ViewModel) -> Result<(), ReconcilerError>;

    /// Remove every child in order, running its hide hook.
    fn remove_all(&mut self) -> Vec<ViewId>;

    fn notify_will_show(&mut self, index: usize) -> Result<(), ReconcilerError>;

    fn notify_was_hidden(&mut self, index: usize) -> Result<(), ReconcilerError>;

    /// Deliver a selection event; returns whether the child had a handler.
    fn select(&self, index: usize) -> Result<bool, ReconcilerError>;

    fn layout_axis(&self) -> Option<Axis> {
        None
    }

    fn bind_equal_size(&mut self, _constraint: SizeConstraint) {}
}

/// Bookkeeping for one realized child.
pub struct ChildSlot {
    id: ViewId,
    tag: RenderTag,
    view: Box<dyn ReusableView>,
    payload: Payload,
    on_select: Option<SelectionHandler>,
}

impl ChildSlot {
    pub fn new(view: Box<dyn ReusableView>, model: &ViewModel) -> Self {
        let mut slot = ChildSlot {
            id: next_view_id(),
            tag: model.tag().clone(),
            view,
            payload: Payload::Null,
            on_select: None,
        };
        slot.reconfigure(model);
        slot
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn tag(&self) -> &RenderTag {
        &self.tag
    }

    pub fn rendered(&self) -> RenderedChild {
        RenderedChild { tag: self.tag.clone(), view: self.id }
    }

    pub fn reconfigure(&mut self, model: &ViewModel) {
        debug_assert_eq!(&self.tag, model.tag());
        self.view.configure(model.payload());
        self.payload = model.payload().clone();
        self.on_select = model.selection_handler().cloned();
    }

    /// Re-targets a pooled slot at a new model of the same tag.
    pub fn recycle(&mut self, model: &ViewModel) {
        self.view.prepare_for_reuse();
        self.reconfigure(model);
    }

    pub fn fill(&mut self, container: ContainerKind) {
        self.view.fill(container);
    }

    pub fn show(&mut self) {
        self.view.will_be_shown(&self.payload);
    }

    pub fn hide(&mut self) {
        self.view.was_hidden(&self.payload);
    }

    pub fn select(&self) -> bool {
        match &self.on_select {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for ChildSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildSlot")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("payload", &self.payload)
            .finish()
    }
}

pub(crate) fn slot_at(slots: &[ChildSlot], index: usize) -> Result<&ChildSlot, ReconcilerError> {
    let len = slots.len();
    slots.get(index).ok_or(ReconcilerError::IndexOutOfBounds { index, len })
}

pub(crate) fn slot_at_mut(slots: &mut [ChildSlot], index: usize) -> Result<&mut ChildSlot, ReconcilerError> {
    let len = slots.len();
    slots.get_mut(index).ok_or(ReconcilerError::IndexOutOfBounds { index, len })
}
