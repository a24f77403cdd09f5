//! Declarative view-model reconciliation for stack, table and collection surfaces
//!
//! A caller hands an ordered sequence of [`ViewModel`]s to
//! [`Reconciler::apply`]. When the surface's current children have the same
//! length and the same render tag at every position, each child is
//! reconfigured in place; otherwise every child is removed and the sequence is
//! rebuilt from the [`ViewRegistry`]'s factories.
pub mod config;
pub mod converters;
pub mod diff_engine;
pub mod errors;
pub mod list;
pub mod registry;
pub mod reuse;
pub mod selection;
pub mod spacing;
pub mod stack;
pub mod state;
pub mod surface;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::ReconcilerConfig;
pub use errors::ReconcilerError;
pub use list::{ListStyle, ListSurface, SupplementaryKind};
pub use registry::ViewRegistry;
pub use reuse::{RebuildReason, ReuseDecision, can_reuse};
pub use spacing::{Axis, Dimension, EqualSpacing, SizeConstraint};
pub use stack::StackSurface;
pub use state::{Observable, Subscription, SubscriptionBag};
pub use surface::{ContainerKind, RenderSurface, ReusableView};
pub use types::{Patch, PatchAction, Payload, ReconciliationResult, RenderTag, RenderedChild, ViewId, ViewModel};

use diff_engine::DiffEngine;
use selection::SelectionFeedback;
use std::rc::Rc;

pub struct Reconciler {
    registry: ViewRegistry,
    config: ReconcilerConfig,
    feedback: SelectionFeedback,
}

impl Reconciler {
    pub fn new(registry: ViewRegistry) -> Self {
        Self::with_config(registry, ReconcilerConfig::default())
    }

    pub fn with_config(registry: ViewRegistry, config: ReconcilerConfig) -> Self {
        log::info!(
            "Reconciler: initialized with {} render types (decorate_selection={}, equal_distribution={})",
            registry.len(),
            config.decorate_selection,
            config.equal_distribution
        );
        Reconciler {
            registry,
            config,
            feedback: Rc::new(|| log::trace!("Reconciler: selection feedback")),
        }
    }

    /// Replaces the visual feedback run before decorated selection handlers.
    pub fn set_selection_feedback(&mut self, feedback: impl Fn() + 'static) {
        self.feedback = Rc::new(feedback);
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ViewRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Brings `surface` in line with `models`.
    ///
    /// Either every child is reconfigured in place or the whole surface is
    /// rebuilt. An unregistered render type fails before anything is removed.
    pub fn apply<S: RenderSurface + ?Sized>(
        &self,
        models: &[ViewModel],
        surface: &mut S,
    ) -> Result<ReconciliationResult, ReconcilerError> {
        let mut result = ReconciliationResult::default();
        let mut engine = DiffEngine::new(&self.registry, &self.config, &self.feedback, surface, &mut result);
        engine.reconcile(models)?;
        log::debug!(
            "Reconciler: applied {} models (reused={}, created={}, removed={}, reconfigured={})",
            models.len(),
            result.reused,
            result.created(),
            result.removed(),
            result.reconfigured()
        );
        Ok(result)
    }

    /// Single-item attach that bypasses reconciliation.
    pub fn add_arranged(&self, model: &ViewModel, stack: &mut StackSurface) -> Result<ViewId, ReconcilerError> {
        stack.add_arranged(model, &self.registry)
    }
}
