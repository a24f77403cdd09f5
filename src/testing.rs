//! Recording views shared by the unit tests
use crate::registry::ViewRegistry;
use crate::surface::{ContainerKind, ReusableView};
use crate::types::Payload;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Created(String),
    Configured(String, Payload),
    PreparedForReuse(String),
    Shown(String, Payload),
    Hidden(String, Payload),
    Filled(String, ContainerKind),
}

#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<ViewEvent>>>);

impl EventLog {
    pub fn push(&self, event: ViewEvent) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&ViewEvent) -> bool) -> usize {
        self.0.borrow().iter().filter(|e| pred(e)).count()
    }

    pub fn created(&self) -> usize {
        self.count(|e| matches!(e, ViewEvent::Created(_)))
    }

    pub fn configured(&self) -> usize {
        self.count(|e| matches!(e, ViewEvent::Configured(..)))
    }

    pub fn hidden(&self) -> usize {
        self.count(|e| matches!(e, ViewEvent::Hidden(..)))
    }
}

pub struct RecordingView {
    name: String,
    log: EventLog,
}

impl RecordingView {
    pub fn new(name: &str, log: &EventLog) -> Self {
        RecordingView { name: name.to_string(), log: log.clone() }
    }
}

impl ReusableView for RecordingView {
    fn configure(&mut self, payload: &Payload) {
        self.log.push(ViewEvent::Configured(self.name.clone(), payload.clone()));
    }

    fn prepare_for_reuse(&mut self) {
        self.log.push(ViewEvent::PreparedForReuse(self.name.clone()));
    }

    fn will_be_shown(&mut self, payload: &Payload) {
        self.log.push(ViewEvent::Shown(self.name.clone(), payload.clone()));
    }

    fn was_hidden(&mut self, payload: &Payload) {
        self.log.push(ViewEvent::Hidden(self.name.clone(), payload.clone()));
    }

    fn fill(&mut self, container: ContainerKind) {
        self.log.push(ViewEvent::Filled(self.name.clone(), container));
    }
}

/// Registry whose factories log a `Created` event per construction.
pub fn registry(tags: &[&str], log: &EventLog) -> ViewRegistry {
    let mut registry = ViewRegistry::new();
    for tag in tags {
        let name = tag.to_string();
        let log = log.clone();
        registry.register(*tag, move || {
            log.push(ViewEvent::Created(name.clone()));
            RecordingView::new(&name, &log)
        });
    }
    registry
}
