use super::tables::LINKER_POSITIONS;
use crate::core::models::structure::Structure;
use std::ops::Range;
use thiserror::Error;

/// Atoms in one repeat cell of the TP-PA framework.
pub const CELL_ATOMS: usize = 72;
/// Atoms in one donor (node) unit.
pub const DONOR_ATOMS: usize = 15;

// Offsets of the units inside a repeat cell: two nodes bracketing three linkers.
const DONOR_OFFSETS: [usize; 2] = [0, 57];
const LINKER_OFFSETS: [usize; 3] = [15, 29, 43];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("A framework of {natom} atoms is not a whole number of {cell}-atom repeat cells")]
    PartialCell { natom: usize, cell: usize },
    #[error("The framework contains no repeat cells")]
    Empty,
    #[error("Layout covers {expected} atoms, but the structure has {found}")]
    AtomCountMismatch { expected: usize, found: usize },
}

/// Maps unit indices to atom index ranges for a framework built from
/// consecutive 72-atom repeat cells.
///
/// Each repeat cell holds two donor units (atoms `0..15` and `57..72`) and
/// three linking units (`15..29`, `29..43`, `43..57`). Units are numbered
/// cell by cell, so donor unit `u` lives in cell `u / 2` and linking unit `p`
/// in cell `p / 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameworkLayout {
    cells: usize,
}

impl FrameworkLayout {
    pub fn new(cells: usize) -> Result<Self, LayoutError> {
        if cells == 0 {
            return Err(LayoutError::Empty);
        }
        Ok(Self { cells })
    }

    /// Derives the layout from a structure's atom count.
    pub fn for_structure(structure: &Structure) -> Result<Self, LayoutError> {
        Self::for_atom_count(structure.natom())
    }

    pub fn for_atom_count(natom: usize) -> Result<Self, LayoutError> {
        if natom % CELL_ATOMS != 0 {
            return Err(LayoutError::PartialCell {
                natom,
                cell: CELL_ATOMS,
            });
        }
        Self::new(natom / CELL_ATOMS)
    }

    /// Ensures `structure` has exactly the atoms this layout describes.
    pub fn check(&self, structure: &Structure) -> Result<(), LayoutError> {
        if structure.natom() != self.atom_count() {
            return Err(LayoutError::AtomCountMismatch {
                expected: self.atom_count(),
                found: structure.natom(),
            });
        }
        Ok(())
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    pub fn atom_count(&self) -> usize {
        self.cells * CELL_ATOMS
    }

    pub fn donor_unit_count(&self) -> usize {
        self.cells * DONOR_OFFSETS.len()
    }

    pub fn linker_unit_count(&self) -> usize {
        self.cells * LINKER_OFFSETS.len()
    }

    /// Atom range of donor unit `unit`, or `None` if it is out of range.
    pub fn donor_unit_atoms(&self, unit: usize) -> Option<Range<usize>> {
        if unit >= self.donor_unit_count() {
            return None;
        }
        let start = CELL_ATOMS * (unit / 2) + DONOR_OFFSETS[unit % 2];
        Some(start..start + DONOR_ATOMS)
    }

    /// Atom range of linking unit `unit`, or `None` if it is out of range.
    pub fn linker_unit_atoms(&self, unit: usize) -> Option<Range<usize>> {
        if unit >= self.linker_unit_count() {
            return None;
        }
        let start = CELL_ATOMS * (unit / 3) + LINKER_OFFSETS[unit % 3];
        Some(start..start + LINKER_POSITIONS)
    }
}
