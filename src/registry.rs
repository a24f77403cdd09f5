//! Factory registry: one constructor per render type
use crate::errors::ReconcilerError;
use crate::surface::ReusableView;
use crate::types::{RenderTag, ViewModel};
use indexmap::IndexMap;

pub type ViewFactory = Box<dyn Fn() -> Box<dyn ReusableView>>;

/// Render types are only usable once a complete constructor is registered.
#[derive(Default)]
pub struct ViewRegistry {
    factories: IndexMap<RenderTag, ViewFactory>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the factory for `tag`.
    pub fn register<V, F>(&mut self, tag: impl Into<RenderTag>, factory: F) -> &mut Self
    where
        V: ReusableView + 'static,
        F: Fn() -> V + 'static,
    {
        let tag = tag.into();
        log::debug!("ViewRegistry: registering render type '{}'", tag);
        self.factories
            .insert(tag, Box::new(move || Box::new(factory()) as Box<dyn ReusableView>));
        self
    }

    pub fn contains(&self, tag: &RenderTag) -> bool {
        self.factories.contains_key(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &RenderTag> {
        self.factories.keys()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub fn make(&self, tag: &RenderTag) -> Result<Box<dyn ReusableView>, ReconcilerError> {
        match self.factories.get(tag) {
            Some(factory) => Ok(factory()),
            None => {
                log::error!("ViewRegistry: no factory for render type '{}'", tag);
                Err(ReconcilerError::UnregisteredRenderType { tag: tag.to_string() })
            }
        }
    }

    /// Fails on the first model whose tag has no factory.
    pub fn ensure_registered(&self, models: &[ViewModel]) -> Result<(), ReconcilerError> {
        match models.iter().find(|m| !self.contains(m.tag())) {
            Some(model) => {
                log::error!("ViewRegistry: no factory for render type '{}'", model.tag());
                Err(ReconcilerError::UnregisteredRenderType { tag: model.tag().to_string() })
            }
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}
