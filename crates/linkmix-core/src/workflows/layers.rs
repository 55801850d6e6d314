use super::error::WorkflowError;
use crate::core::models::structure::{Structure, StructureError};
use crate::core::utils::geometry::centroid;
use tracing::{debug, info, instrument};

/// Splits `structure` into its bonded layers, ordered by mean height along z.
pub fn layers_by_height(structure: &Structure) -> Vec<Vec<usize>> {
    let mut layers: Vec<(f64, Vec<usize>)> = structure
        .connected_components()
        .into_iter()
        .map(|atoms| {
            let z = centroid(atoms.iter().map(|&i| &structure.positions()[i]))
                .map_or(0.0, |c| c.z);
            (z, atoms)
        })
        .collect();
    layers.sort_by(|a, b| a.0.total_cmp(&b.0));
    layers.into_iter().map(|(_, atoms)| atoms).collect()
}

/// Extracts the selected layers into a new periodic structure.
///
/// `select` indexes the layers in order of mean height; the chosen layers are
/// concatenated in the given order. The z component of the stacking vector is
/// divided by `c_divisor` to match the reduced number of layers.
#[instrument(skip_all, name = "layer_extraction", fields(select = ?select))]
pub fn extract_layers(
    structure: &Structure,
    select: &[usize],
    c_divisor: f64,
) -> Result<Structure, WorkflowError> {
    if !c_divisor.is_finite() || c_divisor <= 0.0 {
        return Err(WorkflowError::InvalidParameter {
            name: "c-divisor",
            reason: format!("must be positive, got {}", c_divisor),
        });
    }
    let cell = structure.cell().ok_or(StructureError::MissingCell)?;

    let layers = layers_by_height(structure);
    debug!(layers = layers.len(), "Identified bonded layers.");

    let mut indices = Vec::new();
    for &index in select {
        let layer = layers.get(index).ok_or(WorkflowError::LayerOutOfRange {
            index,
            available: layers.len(),
        })?;
        indices.extend_from_slice(layer);
    }

    let mut stacking = cell.vector(2);
    stacking.z /= c_divisor;
    let extracted = structure
        .subsystem(&indices)?
        .with_cell(Some(cell.with_vector(2, stacking)));
    info!(atoms = extracted.natom(), "Extracted layers.");
    Ok(extracted)
}
