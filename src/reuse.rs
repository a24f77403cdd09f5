//! Positional, all-or-nothing reuse decision
//!
//! A new model sequence can reuse the rendered children only when both have
//! the same length and the tag at every index matches. There is no keyed or
//! partial reuse: one mismatch rebuilds the whole sequence.
use crate::types::{RenderedChild, ViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildReason {
    LengthMismatch { old: usize, new: usize },
    TagMismatch { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReuseDecision {
    Reuse,
    Rebuild(RebuildReason),
}

impl ReuseDecision {
    pub fn is_reuse(self) -> bool {
        matches!(self, ReuseDecision::Reuse)
    }
}

pub fn decide(old: &[RenderedChild], new: &[ViewModel]) -> ReuseDecision {
    if old.len() != new.len() {
        return ReuseDecision::Rebuild(RebuildReason::LengthMismatch {
            old: old.len(),
            new: new.len(),
        });
    }
    match old
        .iter()
        .zip(new)
        .position(|(child, model)| child.tag != *model.tag())
    {
        Some(index) => ReuseDecision::Rebuild(RebuildReason::TagMismatch { index }),
        None => ReuseDecision::Reuse,
    }
}

pub fn can_reuse(old: &[RenderedChild], new: &[ViewModel]) -> bool {
    decide(old, new).is_reuse()
}
