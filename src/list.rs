//! Table / collection surface backed by a per-tag recycling pool
use crate::Reconciler;
use crate::errors::ReconcilerError;
use crate::registry::ViewRegistry;
use crate::surface::{ChildSlot, ContainerKind, RenderSurface, slot_at, slot_at_mut};
use crate::types::{ReconciliationResult, RenderTag, RenderedChild, ViewId, ViewModel};
use indexmap::IndexMap;
use phf::phf_map;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Table,
    Collection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupplementaryKind {
    Header,
    Footer,
}

// Compile-time element kind lookup
static ELEMENT_KINDS: phf::Map<&'static str, SupplementaryKind> = phf_map! {
    "header" => SupplementaryKind::Header,
    "footer" => SupplementaryKind::Footer,
    "section-header" => SupplementaryKind::Header,
    "section-footer" => SupplementaryKind::Footer,
};

impl SupplementaryKind {
    /// Unknown kinds are rejected rather than mapped to a guess.
    pub fn parse(kind: &str) -> Result<Self, ReconcilerError> {
        ELEMENT_KINDS.get(kind).copied().ok_or_else(|| {
            log::error!("ListSurface: unsupported supplementary element kind '{}'", kind);
            ReconcilerError::UnsupportedElementKind { kind: kind.to_string() }
        })
    }
}

#[derive(Debug)]
pub struct ListSurface {
    style: ListStyle,
    cells: Vec<ChildSlot>,
    pool: IndexMap<RenderTag, Vec<ChildSlot>>,
    supplementary: IndexMap<SupplementaryKind, ChildSlot>,
    fresh_allocations: usize,
}

impl ListSurface {
    pub fn new(style: ListStyle) -> Self {
        ListSurface {
            style,
            cells: Vec::new(),
            pool: IndexMap::new(),
            supplementary: IndexMap::new(),
            fresh_allocations: 0,
        }
    }

    pub fn table() -> Self {
        Self::new(ListStyle::Table)
    }

    pub fn collection() -> Self {
        Self::new(ListStyle::Collection)
    }

    pub fn style(&self) -> ListStyle {
        self.style
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells waiting in the recycling pool, across all tags.
    pub fn pool_size(&self) -> usize {
        self.pool.values().map(Vec::len).sum()
    }

    /// Cells built from a factory rather than dequeued from the pool.
    pub fn fresh_allocations(&self) -> usize {
        self.fresh_allocations
    }

    pub fn will_display(&mut self, index: usize) -> Result<(), ReconcilerError> {
        self.notify_will_show(index)
    }

    pub fn did_end_displaying(&mut self, index: usize) -> Result<(), ReconcilerError> {
        self.notify_was_hidden(index)
    }

    fn dequeue(&mut self, model: &ViewModel, registry: &ViewRegistry) -> Result<ChildSlot, ReconcilerError> {
        if let Some(mut slot) = self.pool.get_mut(model.tag()).and_then(Vec::pop) {
            log::trace!("ListSurface: dequeued pooled {} for '{}'", slot.id(), model.tag());
            slot.recycle(model);
            return Ok(slot);
        }
        let view = registry.make(model.tag())?;
        let mut slot = ChildSlot::new(view, model);
        slot.fill(ContainerKind::Cell);
        self.fresh_allocations += 1;
        Ok(slot)
    }

    /// Reconciles the children against `models`.
    pub fn configure(
        &mut self,
        models: &[ViewModel],
        reconciler: &Reconciler,
    ) -> Result<ReconciliationResult, ReconcilerError> {
        reconciler.apply(models, self)
    }

    /// Installs or refreshes the header/footer view for `kind`.
    pub fn set_supplementary(
        &mut self,
        kind: &str,
        model: &ViewModel,
        registry: &ViewRegistry,
    ) -> Result<ViewId, ReconcilerError> {
        let kind = SupplementaryKind::parse(kind)?;
        if let Some(slot) = self.supplementary.get_mut(&kind) {
            if slot.tag() == model.tag() {
                slot.reconfigure(model);
                return Ok(slot.id());
            }
        }
        let view = registry.make(model.tag())?;
        let mut slot = ChildSlot::new(view, model);
        slot.fill(ContainerKind::Supplementary);
        slot.show();
        let id = slot.id();
        if let Some(mut previous) = self.supplementary.insert(kind, slot) {
            previous.hide();
        }
        log::debug!("ListSurface: {:?} {:?} is now '{}' ({})", self.style, kind, model.tag(), id);
        Ok(id)
    }

    pub fn supplementary(&self, kind: SupplementaryKind) -> Option<RenderedChild> {
        self.supplementary.get(&kind).map(ChildSlot::rendered)
    }
}

impl RenderSurface for ListSurface {
    fn children(&self) -> Vec<RenderedChild> {
        self.cells.iter().map(ChildSlot::rendered).collect()
    }

    fn create_view(&mut self, model: &ViewModel, registry: &ViewRegistry) -> Result<ViewId, ReconcilerError> {
        let slot = self.dequeue(model, registry)?;
        let id = slot.id();
        self.cells.push(slot);
        Ok(id)
    }

    fn reconfigure(&mut self, index: usize, model: &ViewModel) -> Result<(), ReconcilerError> {
        slot_at_mut(&mut self.cells, index)?.reconfigure(model);
        Ok(())
    }

    /// Returns every cell to the pool; the cells stay alive for reuse.
    fn remove_all(&mut self) -> Vec<ViewId> {
        let mut removed = Vec::with_capacity(self.cells.len());
        for mut slot in self.cells.drain(..) {
            slot.hide();
            removed.push(slot.id());
            self.pool.entry(slot.tag().clone()).or_default().push(slot);
        }
        removed
    }

    fn notify_will_show(&mut self, index: usize) -> Result<(), ReconcilerError> {
        slot_at_mut(&mut self.cells, index)?.show();
        Ok(())
    }

    fn notify_was_hidden(&mut self, index: usize) -> Result<(), ReconcilerError> {
        slot_at_mut(&mut self.cells, index)?.hide();
        Ok(())
    }

    fn select(&self, index: usize) -> Result<bool, ReconcilerError> {
        Ok(slot_at(&self.cells, index)?.select())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EventLog, ViewEvent, registry};
    use serde_json::json;

    fn model(tag: &str, n: i64) -> ViewModel {
        ViewModel::new(tag, json!({ "n": n }))
    }

    #[test]
    fn fresh_cells_are_filled_into_cell_container() {
        let log = EventLog::default();
        let registry = registry(&["Row"], &log);
        let mut table = ListSurface::table();
        table.create_view(&model("Row", 1), &registry).unwrap();
        assert_eq!(
            log.events(),
            vec![
                ViewEvent::Created("Row".into()),
                ViewEvent::Configured("Row".into(), json!({ "n": 1 })),
                ViewEvent::Filled("Row".into(), ContainerKind::Cell),
            ]
        );
        assert_eq!(table.fresh_allocations(), 1);
    }

    #[test]
    fn removed_cells_are_pooled_and_prepared_before_reuse() {
        let log = EventLog::default();
        let registry = registry(&["Row"], &log);
        let mut table = ListSurface::table();
        let first = table.create_view(&model("Row", 1), &registry).unwrap();
        let second = table.create_view(&model("Row", 2), &registry).unwrap();
        log.clear();

        assert_eq!(table.remove_all(), vec![first, second]);
        assert_eq!(table.pool_size(), 2);
        assert_eq!(
            log.events(),
            vec![
                ViewEvent::Hidden("Row".into(), json!({ "n": 1 })),
                ViewEvent::Hidden("Row".into(), json!({ "n": 2 })),
            ]
        );
        log.clear();

        let again = table.create_view(&model("Row", 3), &registry).unwrap();
        assert_eq!(again, second);
        assert_eq!(table.pool_size(), 1);
        assert_eq!(table.fresh_allocations(), 2);
        assert_eq!(
            log.events(),
            vec![
                ViewEvent::PreparedForReuse("Row".into()),
                ViewEvent::Configured("Row".into(), json!({ "n": 3 })),
            ]
        );
    }

    #[test]
    fn pool_is_keyed_by_tag() {
        let log = EventLog::default();
        let registry = registry(&["Row", "Banner"], &log);
        let mut collection = ListSurface::collection();
        collection.create_view(&model("Row", 1), &registry).unwrap();
        collection.remove_all();

        collection.create_view(&model("Banner", 1), &registry).unwrap();
        assert_eq!(collection.fresh_allocations(), 2);
        assert_eq!(collection.pool_size(), 1);
    }

    #[test]
    fn display_callbacks_forward_to_hooks() {
        let log = EventLog::default();
        let registry = registry(&["Row"], &log);
        let mut table = ListSurface::table();
        table.create_view(&model("Row", 7), &registry).unwrap();
        log.clear();

        table.will_display(0).unwrap();
        table.did_end_displaying(0).unwrap();
        assert_eq!(
            log.events(),
            vec![
                ViewEvent::Shown("Row".into(), json!({ "n": 7 })),
                ViewEvent::Hidden("Row".into(), json!({ "n": 7 })),
            ]
        );
        assert!(table.will_display(3).is_err());
    }

    #[test]
    fn configure_rebuild_hides_cells_before_refilling_from_pool() {
        let log = EventLog::default();
        let reconciler = Reconciler::new(registry(&["A", "B"], &log));
        let mut collection = ListSurface::collection();
        collection
            .configure(&[model("A", 1), model("B", 2)], &reconciler)
            .unwrap();
        log.clear();

        let result = collection.configure(&[model("B", 3)], &reconciler).unwrap();
        assert_eq!((result.removed(), result.created()), (2, 1));
        assert_eq!(
            &log.events()[..4],
            &[
                ViewEvent::Hidden("A".into(), json!({ "n": 1 })),
                ViewEvent::Hidden("B".into(), json!({ "n": 2 })),
                ViewEvent::PreparedForReuse("B".into()),
                ViewEvent::Configured("B".into(), json!({ "n": 3 })),
            ]
        );
        assert_eq!(collection.pool_size(), 1);
    }

    #[test]
    fn unknown_supplementary_kind_is_rejected() {
        let log = EventLog::default();
        let registry = registry(&["Header"], &log);
        let mut collection = ListSurface::collection();
        let err = collection
            .set_supplementary("sticky-badge", &model("Header", 1), &registry)
            .unwrap_err();
        assert!(matches!(err, ReconcilerError::UnsupportedElementKind { ref kind } if kind == "sticky-badge"));
        assert!(log.events().is_empty());
    }

    #[test]
    fn supplementary_with_same_tag_is_reconfigured_in_place() {
        let log = EventLog::default();
        let registry = registry(&["Header", "Hero"], &log);
        let mut collection = ListSurface::collection();
        let first = collection.set_supplementary("section-header", &model("Header", 1), &registry).unwrap();
        let same = collection.set_supplementary("header", &model("Header", 2), &registry).unwrap();
        assert_eq!(first, same);
        assert_eq!(log.created(), 1);

        let replaced = collection.set_supplementary("header", &model("Hero", 3), &registry).unwrap();
        assert_ne!(replaced, first);
        assert_eq!(log.hidden(), 1);
        assert_eq!(collection.supplementary(SupplementaryKind::Header).unwrap().view, replaced);
        assert!(collection.supplementary(SupplementaryKind::Footer).is_none());
    }
}
