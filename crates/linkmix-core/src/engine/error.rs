use thiserror::Error;

use crate::core::framework::layout::LayoutError;
use crate::core::models::structure::StructureError;

#[derive(Debug, Error)]
pub enum ReassignError {
    #[error("Conversion target {unit} is out of range: the framework has {donor_units} donor units")]
    IndexRange { unit: usize, donor_units: usize },

    #[error("Unexpected chemistry in unit {unit}, atom {atom} ('{label}'): {detail}")]
    ChemistryConsistency {
        unit: usize,
        atom: usize,
        label: String,
        detail: String,
    },

    #[error("Structure does not match the framework layout: {source}")]
    Layout {
        #[from]
        source: LayoutError,
    },

    #[error("Failed to assemble the converted structure: {source}")]
    Structure {
        #[from]
        source: StructureError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
