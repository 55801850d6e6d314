use super::error::WorkflowError;
use crate::core::framework::layout::CELL_ATOMS;
use crate::core::models::structure::{Structure, StructureError};
use crate::core::utils::geometry::lateral_shift;
use crate::core::utils::units::{DEGREE, angstrom_to_bohr, bohr_to_angstrom};
use nalgebra::Vector3;
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// Parameters of the offset-stacked multilayer. Lengths are in ångström,
/// angles in degrees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct StackingConfig {
    pub interlayer_distance: f64,
    /// Lateral slip between consecutive layers.
    pub layer_offset: f64,
    pub first_angle: f64,
    pub angle_step: f64,
    pub layers: usize,
    /// Copies of the whole layer sequence along the stacking axis.
    pub repeats: usize,
}

impl Default for StackingConfig {
    fn default() -> Self {
        Self {
            interlayer_distance: 3.0,
            layer_offset: 2.5,
            first_angle: 30.0,
            angle_step: 60.0,
            layers: 6,
            repeats: 2,
        }
    }
}

impl StackingConfig {
    pub fn validate(&self) -> Result<(), WorkflowError> {
        let positive = |name: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(WorkflowError::InvalidParameter {
                    name,
                    reason: format!("must be a positive length, got {}", value),
                })
            }
        };
        positive("interlayer-distance", self.interlayer_distance)?;
        if !self.layer_offset.is_finite() || self.layer_offset < 0.0 {
            return Err(WorkflowError::InvalidParameter {
                name: "layer-offset",
                reason: format!("must be a non-negative length, got {}", self.layer_offset),
            });
        }
        for (name, angle) in [("first-angle", self.first_angle), ("angle-step", self.angle_step)] {
            if !angle.is_finite() {
                return Err(WorkflowError::InvalidParameter {
                    name,
                    reason: format!("must be finite, got {}", angle),
                });
            }
        }
        for (name, count) in [("layers", self.layers), ("repeats", self.repeats)] {
            if count == 0 {
                return Err(WorkflowError::InvalidParameter {
                    name,
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Cumulative lateral displacement of each layer, in bohr.
    pub fn layer_shifts(&self) -> Vec<Vector3<f64>> {
        let mut shift = Vector3::zeros();
        (0..self.layers)
            .map(|i| {
                let current = shift;
                let angle = (self.first_angle + i as f64 * self.angle_step) * DEGREE;
                shift += lateral_shift(angle, angstrom_to_bohr(self.layer_offset));
                current
            })
            .collect()
    }
}

/// Builds the offset-stacked framework from a single-layer repeat cell.
///
/// The height of the monolayer's stacking vector is set to the interlayer
/// distance while its in-plane tilt is kept. The layer is then doubled
/// in-plane and stacked `layers` times, each layer slipped by the cumulative
/// offset, and the stack is repeated `repeats` times along the stacking axis. Atom order keeps whole 72-atom framework
/// cells contiguous, so the result is addressable by
/// [`FrameworkLayout`](crate::core::framework::layout::FrameworkLayout).
#[instrument(skip_all, name = "stacking_workflow")]
pub fn build_stacked_framework(
    monolayer: &Structure,
    config: &StackingConfig,
) -> Result<Structure, WorkflowError> {
    config.validate()?;
    if monolayer.natom() != CELL_ATOMS {
        return Err(WorkflowError::MonolayerSize {
            expected: CELL_ATOMS,
            found: monolayer.natom(),
        });
    }
    let cell = monolayer.cell().ok_or(StructureError::MissingCell)?;

    let mut stacking = cell.vector(2);
    stacking.z = angstrom_to_bohr(config.interlayer_distance);
    let layer = monolayer
        .with_cell(Some(cell.with_vector(2, stacking)))
        .supercell([2, 2, 1])?;
    let layer_atoms = layer.natom();
    debug!(atoms = layer_atoms, "Built in-plane supercell.");

    let mut stack = layer.supercell([1, 1, config.layers])?;
    for (i, shift) in config.layer_shifts().into_iter().enumerate() {
        stack = stack.translated(i * layer_atoms..(i + 1) * layer_atoms, shift)?;
    }

    let stacked = stack.supercell([1, 1, config.repeats])?;
    let height = stacked.cell().map_or(0.0, |c| bohr_to_angstrom(c.vector(2).z));
    info!(
        layers = config.layers,
        repeats = config.repeats,
        atoms = stacked.natom(),
        height,
        "Built stacked framework."
    );
    Ok(stacked)
}
