//! Core value types shared by the reuse engine, the diff engine and surfaces
use crate::selection::SelectionHandler;
use crate::spacing::{EqualSpacing, SizeConstraint};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Opaque configuration data consumed by a view's `configure`.
pub type Payload = serde_json::Value;

/// Identifier of the concrete view type a model renders into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RenderTag(String);

impl RenderTag {
    pub fn new(name: impl Into<String>) -> Self {
        RenderTag(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RenderTag {
    fn from(name: &str) -> Self {
        RenderTag(name.to_string())
    }
}

impl From<String> for RenderTag {
    fn from(name: String) -> Self {
        RenderTag(name)
    }
}

impl fmt::Display for RenderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declarative description of one unit to render.
///
/// The tag is fixed at construction and a payload is always present.
/// Optional behaviours are explicit fields rather than probed at runtime.
#[derive(Clone)]
pub struct ViewModel {
    tag: RenderTag,
    payload: Payload,
    on_select: Option<SelectionHandler>,
    spacing: Option<EqualSpacing>,
}

impl ViewModel {
    pub fn new(tag: impl Into<RenderTag>, payload: Payload) -> Self {
        ViewModel {
            tag: tag.into(),
            payload,
            on_select: None,
            spacing: None,
        }
    }

    pub fn with_selection(mut self, handler: impl Fn() + 'static) -> Self {
        let handler: SelectionHandler = std::rc::Rc::new(handler);
        self.on_select = Some(handler);
        self
    }

    pub fn with_equal_spacing(mut self, spacing: EqualSpacing) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn tag(&self) -> &RenderTag {
        &self.tag
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn selection_handler(&self) -> Option<&SelectionHandler> {
        self.on_select.as_ref()
    }

    pub fn equal_spacing(&self) -> Option<EqualSpacing> {
        self.spacing
    }

    pub(crate) fn replace_selection_handler(&mut self, handler: SelectionHandler) {
        self.on_select = Some(handler);
    }
}

impl fmt::Debug for ViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewModel")
            .field("tag", &self.tag)
            .field("payload", &self.payload)
            .field("selectable", &self.on_select.is_some())
            .field("spacing", &self.spacing)
            .finish()
    }
}

/// Handle of a live view owned by a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ViewId(usize);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view_{}", self.0)
    }
}

/// What currently occupies one position of a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChild {
    pub tag: RenderTag,
    pub view: ViewId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatchAction {
    Insert,
    Remove,
    Reconfigure,
}

impl fmt::Display for PatchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatchAction::Insert => "INSERT",
            PatchAction::Remove => "REMOVE",
            PatchAction::Reconfigure => "RECONFIGURE",
        };
        f.write_str(name)
    }
}

/// One structural or configuration change applied to a surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patch {
    pub action: PatchAction,
    pub index: usize,
    pub view: ViewId,
    pub tag: RenderTag,
}

/// Everything a single `apply` did to a surface.
#[derive(Debug, Default)]
pub struct ReconciliationResult {
    pub reused: bool,
    pub patches: Vec<Patch>,
    pub constraints: Vec<SizeConstraint>,
}

impl ReconciliationResult {
    fn count(&self, action: PatchAction) -> usize {
        self.patches.iter().filter(|p| p.action == action).count()
    }

    pub fn created(&self) -> usize {
        self.count(PatchAction::Insert)
    }

    pub fn removed(&self) -> usize {
        self.count(PatchAction::Remove)
    }

    pub fn reconfigured(&self) -> usize {
        self.count(PatchAction::Reconfigure)
    }

    /// Patch log as JSON, for diagnostics.
    pub fn patches_json(&self) -> crate::errors::Result<serde_json::Value> {
        Ok(serde_json::to_value(&self.patches)?)
    }
}

/// Global ID generator (lock-free, atomic)
static ID_COUNTER: Lazy<AtomicUsize> = Lazy::new(|| AtomicUsize::new(0));

pub fn next_view_id() -> ViewId {
    ViewId(ID_COUNTER.fetch_add(1, Ordering::SeqCst))
}
