use thiserror::Error;

use crate::core::framework::layout::LayoutError;
use crate::core::models::structure::StructureError;
use crate::engine::error::ReassignError;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Scenario '{label}' failed: {source}")]
    Scenario {
        label: String,
        #[source]
        source: ReassignError,
    },

    #[error(transparent)]
    Reassign(#[from] ReassignError),

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Stacking requires a single {expected}-atom framework cell, got {found} atoms")]
    MonolayerSize { expected: usize, found: usize },

    #[error("Cannot draw {count} distinct donor units from {available}")]
    ScenarioSize { count: usize, available: usize },

    #[error("Layer {index} requested, but the structure has only {available} layers")]
    LayerOutOfRange { index: usize, available: usize },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}
