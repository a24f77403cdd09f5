//! Equal-distribution pass run after a structural rebuild
use crate::types::ViewId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dimension {
    Width,
    Height,
}

impl Axis {
    pub fn dimension(self) -> Dimension {
        match self {
            Axis::Horizontal => Dimension::Width,
            Axis::Vertical => Dimension::Height,
        }
    }
}

/// Marks a model as taking part in equal spacing; only `ready` ones are bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualSpacing {
    pub ready: bool,
}

impl EqualSpacing {
    pub fn ready() -> Self {
        EqualSpacing { ready: true }
    }

    pub fn pending() -> Self {
        EqualSpacing { ready: false }
    }
}

/// `view`'s size along `dimension` equals `anchor`'s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeConstraint {
    pub view: ViewId,
    pub anchor: ViewId,
    pub dimension: Dimension,
}

pub fn equal_size_constraints<I>(children: I, axis: Axis) -> Vec<SizeConstraint>
where
    I: IntoIterator<Item = (ViewId, Option<EqualSpacing>)>,
{
    let eligible: Vec<ViewId> = children
        .into_iter()
        .filter(|(_, spacing)| spacing.is_some_and(|s| s.ready))
        .map(|(view, _)| view)
        .collect();

    let Some((&anchor, rest)) = eligible.split_first() else {
        return Vec::new();
    };
    let dimension = axis.dimension();
    rest.iter()
        .map(|&view| SizeConstraint { view, anchor, dimension })
        .collect()
}
