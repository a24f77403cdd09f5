//! Stack surface: arranged children owned directly, removed synchronously
use crate::Reconciler;
use crate::errors::ReconcilerError;
use crate::registry::ViewRegistry;
use crate::spacing::{Axis, SizeConstraint};
use crate::surface::{ChildSlot, ContainerKind, RenderSurface, slot_at, slot_at_mut};
use crate::types::{ReconciliationResult, RenderedChild, ViewId, ViewModel};

#[derive(Debug)]
pub struct StackSurface {
    axis: Axis,
    arranged: Vec<ChildSlot>,
    constraints: Vec<SizeConstraint>,
}

impl StackSurface {
    pub fn new(axis: Axis) -> Self {
        StackSurface { axis, arranged: Vec::new(), constraints: Vec::new() }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn len(&self) -> usize {
        self.arranged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arranged.is_empty()
    }

    /// Size constraints currently installed between arranged children.
    pub fn constraints(&self) -> &[SizeConstraint] {
        &self.constraints
    }

    /// Reconciles the children against `models`.
    pub fn configure(
        &mut self,
        models: &[ViewModel],
        reconciler: &Reconciler,
    ) -> Result<ReconciliationResult, ReconcilerError> {
        reconciler.apply(models, self)
    }

    /// Always builds and appends a new child; never reconciles.
    pub fn add_arranged(&mut self, model: &ViewModel, registry: &ViewRegistry) -> Result<ViewId, ReconcilerError> {
        let view = registry.make(model.tag())?;
        let mut slot = ChildSlot::new(view, model);
        slot.fill(ContainerKind::Stack);
        slot.show();
        let id = slot.id();
        log::trace!("StackSurface: arranged '{}' as {} at {}", model.tag(), id, self.arranged.len());
        self.arranged.push(slot);
        Ok(id)
    }
}

impl RenderSurface for StackSurface {
    fn children(&self) -> Vec<RenderedChild> {
        self.arranged.iter().map(ChildSlot::rendered).collect()
    }

    fn create_view(&mut self, model: &ViewModel, registry: &ViewRegistry) -> Result<ViewId, ReconcilerError> {
        self.add_arranged(model, registry)
    }

    fn reconfigure(&mut self, index: usize, model: &ViewModel) -> Result<(), ReconcilerError> {
        slot_at_mut(&mut self.arranged, index)?.reconfigure(model);
        Ok(())
    }

    fn remove_all(&mut self) -> Vec<ViewId> {
        self.constraints.clear();
        self.arranged
            .drain(..)
            .map(|mut slot| {
                slot.hide();
                slot.id()
            })
            .collect()
    }

    fn notify_will_show(&mut self, index: usize) -> Result<(), ReconcilerError> {
        slot_at_mut(&mut self.arranged, index)?.show();
        Ok(())
    }

    fn notify_was_hidden(&mut self, index: usize) -> Result<(), ReconcilerError> {
        slot_at_mut(&mut self.arranged, index)?.hide();
        Ok(())
    }

    fn select(&self, index: usize) -> Result<bool, ReconcilerError> {
        Ok(slot_at(&self.arranged, index)?.select())
    }

    fn layout_axis(&self) -> Option<Axis> {
        Some(self.axis)
    }

    fn bind_equal_size(&mut self, constraint: SizeConstraint) {
        log::trace!(
            "StackSurface: binding {:?} of {} to {}",
            constraint.dimension,
            constraint.view,
            constraint.anchor
        );
        self.constraints.push(constraint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EventLog, ViewEvent, registry};
    use serde_json::json;

    #[test]
    fn add_arranged_appends_configured_filled_and_shown() {
        let log = EventLog::default();
        let registry = registry(&["Label"], &log);
        let mut stack = StackSurface::new(Axis::Vertical);

        let first = stack.add_arranged(&ViewModel::new("Label", json!("a")), &registry).unwrap();
        let second = stack.add_arranged(&ViewModel::new("Label", json!("a")), &registry).unwrap();

        assert_ne!(first, second);
        assert_eq!(stack.children().iter().map(|c| c.view).collect::<Vec<_>>(), vec![first, second]);
        assert_eq!(
            &log.events()[..4],
            &[
                ViewEvent::Created("Label".into()),
                ViewEvent::Configured("Label".into(), json!("a")),
                ViewEvent::Filled("Label".into(), ContainerKind::Stack),
                ViewEvent::Shown("Label".into(), json!("a")),
            ]
        );
    }

    #[test]
    fn add_arranged_with_unknown_tag_leaves_stack_untouched() {
        let log = EventLog::default();
        let registry = registry(&[], &log);
        let mut stack = StackSurface::new(Axis::Vertical);
        assert!(stack.add_arranged(&ViewModel::new("Ghost", json!({})), &registry).is_err());
        assert!(stack.is_empty());
    }

    #[test]
    fn remove_all_hides_each_child_in_order_and_drops_constraints() {
        let log = EventLog::default();
        let registry = registry(&["A", "B"], &log);
        let mut stack = StackSurface::new(Axis::Horizontal);
        let a = stack.add_arranged(&ViewModel::new("A", json!(1)), &registry).unwrap();
        let b = stack.add_arranged(&ViewModel::new("B", json!(2)), &registry).unwrap();
        stack.bind_equal_size(SizeConstraint { view: b, anchor: a, dimension: crate::spacing::Dimension::Width });
        log.clear();

        assert_eq!(stack.remove_all(), vec![a, b]);
        assert!(stack.is_empty());
        assert!(stack.constraints().is_empty());
        assert_eq!(
            log.events(),
            vec![ViewEvent::Hidden("A".into(), json!(1)), ViewEvent::Hidden("B".into(), json!(2))]
        );
    }

    #[test]
    fn configure_reconfigures_matching_children_in_place() {
        let log = EventLog::default();
        let reconciler = Reconciler::new(registry(&["A", "B"], &log));
        let mut stack = StackSurface::new(Axis::Vertical);
        let input = vec![ViewModel::new("A", json!(1)), ViewModel::new("B", json!(2))];

        let first = stack.configure(&input, &reconciler).unwrap();
        let ids: Vec<ViewId> = stack.children().iter().map(|c| c.view).collect();
        let second = stack.configure(&input, &reconciler).unwrap();

        assert_eq!(first.created(), 2);
        assert!(second.reused);
        assert_eq!(second.reconfigured(), 2);
        assert_eq!(stack.children().iter().map(|c| c.view).collect::<Vec<_>>(), ids);
    }

    #[test]
    fn reconfigure_out_of_range_is_error() {
        let mut stack = StackSurface::new(Axis::Vertical);
        assert!(stack.reconfigure(0, &ViewModel::new("A", json!(1))).is_err());
    }
}
