//! Reconciler configuration, loadable from JSON
use crate::errors::ReconcilerError;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Wrap selection handlers so a feedback effect runs first.
    pub decorate_selection: bool,
    /// Bind ready equal-spacing children to a shared size after a rebuild.
    pub equal_distribution: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        ReconcilerConfig {
            decorate_selection: true,
            equal_distribution: true,
        }
    }
}

impl ReconcilerConfig {
    pub fn from_json_str(source: &str) -> Result<Self, ReconcilerError> {
        Ok(serde_json::from_str(source)?)
    }
}
