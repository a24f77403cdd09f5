//! Applies a new model sequence to a surface: reuse in place or rebuild
use crate::config::ReconcilerConfig;
use crate::errors::ReconcilerError;
use crate::registry::ViewRegistry;
use crate::reuse::{ReuseDecision, decide};
use crate::selection::{SelectionFeedback, decorate};
use crate::spacing::equal_size_constraints;
use crate::surface::RenderSurface;
use crate::types::*;
use std::borrow::Cow;

pub struct DiffEngine<'a, S: RenderSurface + ?Sized> {
    registry: &'a ViewRegistry,
    config: &'a ReconcilerConfig,
    feedback: &'a SelectionFeedback,
    surface: &'a mut S,
    result: &'a mut ReconciliationResult,
}

impl<'a, S: RenderSurface + ?Sized> DiffEngine<'a, S> {
    pub fn new(
        registry: &'a ViewRegistry,
        config: &'a ReconcilerConfig,
        feedback: &'a SelectionFeedback,
        surface: &'a mut S,
        result: &'a mut ReconciliationResult,
    ) -> Self {
        DiffEngine { registry, config, feedback, surface, result }
    }

    pub fn reconcile(&mut self, models: &[ViewModel]) -> Result<(), ReconcilerError> {
        let models: Cow<'_, [ViewModel]> = if self.config.decorate_selection {
            Cow::Owned(decorate(models, self.feedback))
        } else {
            Cow::Borrowed(models)
        };

        let old_children = self.surface.children();
        match decide(&old_children, &models) {
            ReuseDecision::Reuse => {
                log::debug!("DiffEngine: reusing {} children in place", old_children.len());
                self.reuse(&old_children, &models)
            }
            ReuseDecision::Rebuild(reason) => {
                log::debug!(
                    "DiffEngine: rebuilding {} -> {} children ({:?})",
                    old_children.len(),
                    models.len(),
                    reason
                );
                self.rebuild(&old_children, &models)
            }
        }
    }

    fn reuse(&mut self, old_children: &[RenderedChild], models: &[ViewModel]) -> Result<(), ReconcilerError> {
        self.result.reused = true;
        for (index, (child, model)) in old_children.iter().zip(models).enumerate() {
            self.surface.reconfigure(index, model)?;
            log::trace!("DiffEngine: reconfigured {} '{}' at {}", child.view, child.tag, index);
            self.result.patches.push(Patch {
                action: PatchAction::Reconfigure,
                index,
                view: child.view,
                tag: child.tag.clone(),
            });
        }
        Ok(())
    }

    fn rebuild(&mut self, old_children: &[RenderedChild], models: &[ViewModel]) -> Result<(), ReconcilerError> {
        // Nothing is torn down until every model is known to be constructible.
        self.registry.ensure_registered(models)?;

        let removed = self.surface.remove_all();
        for (index, (view, child)) in removed.into_iter().zip(old_children).enumerate() {
            self.result.patches.push(Patch {
                action: PatchAction::Remove,
                index,
                view,
                tag: child.tag.clone(),
            });
        }

        let mut created = Vec::with_capacity(models.len());
        for (index, model) in models.iter().enumerate() {
            let view = self.surface.create_view(model, self.registry)?;
            log::trace!("DiffEngine: inserted {} '{}' at {}", view, model.tag(), index);
            self.result.patches.push(Patch {
                action: PatchAction::Insert,
                index,
                view,
                tag: model.tag().clone(),
            });
            created.push((view, model.equal_spacing()));
        }

        self.distribute_equally(created);
        Ok(())
    }

    fn distribute_equally(&mut self, created: Vec<(ViewId, Option<crate::spacing::EqualSpacing>)>) {
        if !self.config.equal_distribution {
            return;
        }
        let Some(axis) = self.surface.layout_axis() else {
            return;
        };
        let constraints = equal_size_constraints(created, axis);
        if !constraints.is_empty() {
            log::debug!("DiffEngine: binding {} children to equal {:?}", constraints.len() + 1, axis.dimension());
        }
        for constraint in constraints {
            self.surface.bind_equal_size(constraint);
            self.result.constraints.push(constraint);
        }
    }
}
