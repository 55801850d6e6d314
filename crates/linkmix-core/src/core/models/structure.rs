use super::cell::Cell;
use super::topology::Bond;
use nalgebra::{Point3, Vector3};
use std::collections::{BTreeSet, VecDeque};
use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StructureError {
    #[error(
        "Per-atom sequences differ in length: {numbers} numbers, {positions} positions, {ffatypes} ffatypes"
    )]
    LengthMismatch {
        numbers: usize,
        positions: usize,
        ffatypes: usize,
    },
    #[error("Bond {bond} references atom {atom}, but the structure has only {natom} atoms")]
    BondOutOfRange { bond: Bond, atom: usize, natom: usize },
    #[error("Atom {0} is bonded to itself")]
    SelfBond(usize),
    #[error("Atom index {index} is out of range for a structure of {natom} atoms")]
    AtomOutOfRange { index: usize, natom: usize },
    #[error("Atom index {0} is selected more than once")]
    DuplicateAtom(usize),
    #[error("Operation requires a periodic cell, but the structure has none")]
    MissingCell,
    #[error("The periodic cell is singular")]
    SingularCell,
    #[error("Repetition counts must be positive (got {0:?})")]
    InvalidRepetition([usize; 3]),
    #[error("Atom range {start}..{end} is reversed")]
    ReversedRange { start: usize, end: usize },
}

/// An atomistic snapshot: elements, coordinates, connectivity, force-field
/// labels and an optional periodic cell.
///
/// A `Structure` is immutable once built. Every transformation (`subsystem`,
/// `supercell`, `translated`, ...) returns a new, independently owned value,
/// so a loaded structure can be reused across any number of derived systems.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    /// Atomic numbers, one per atom.
    numbers: Vec<u8>,
    /// Cartesian coordinates in atomic units.
    positions: Vec<Point3<f64>>,
    /// Force-field atom type labels, one per atom.
    ffatypes: Vec<String>,
    /// Covalent bonds, each normalised to `i < j`.
    bonds: Vec<Bond>,
    /// Periodic cell; `None` for isolated systems.
    cell: Option<Cell>,
    /// Cached adjacency list for bond connectivity, indexed by atom.
    adjacency: Vec<Vec<usize>>,
}

impl Structure {
    /// Builds a structure after validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::LengthMismatch`] if the per-atom sequences differ
    /// in length, [`StructureError::BondOutOfRange`] if a bond references a missing
    /// atom, and [`StructureError::SelfBond`] for a bond from an atom to itself.
    /// Bonds are stored with their endpoints normalised to `i < j`.
    pub fn new(
        numbers: Vec<u8>,
        positions: Vec<Point3<f64>>,
        ffatypes: Vec<String>,
        bonds: Vec<Bond>,
        cell: Option<Cell>,
    ) -> Result<Self, StructureError> {
        if numbers.len() != positions.len() || numbers.len() != ffatypes.len() {
            return Err(StructureError::LengthMismatch {
                numbers: numbers.len(),
                positions: positions.len(),
                ffatypes: ffatypes.len(),
            });
        }

        let natom = numbers.len();
        let mut adjacency = vec![Vec::new(); natom];
        let mut normalised = Vec::with_capacity(bonds.len());
        for bond in bonds {
            let bond = Bond::new(bond.i, bond.j);
            if bond.j >= natom {
                return Err(StructureError::BondOutOfRange {
                    bond,
                    atom: bond.j,
                    natom,
                });
            }
            if bond.i == bond.j {
                return Err(StructureError::SelfBond(bond.i));
            }
            adjacency[bond.i].push(bond.j);
            adjacency[bond.j].push(bond.i);
            normalised.push(bond);
        }

        Ok(Self {
            numbers,
            positions,
            ffatypes,
            bonds: normalised,
            cell,
            adjacency,
        })
    }

    pub fn natom(&self) -> usize {
        self.numbers.len()
    }

    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn ffatypes(&self) -> &[String] {
        &self.ffatypes
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn cell(&self) -> Option<&Cell> {
        self.cell.as_ref()
    }

    /// Returns the atoms directly bonded to `atom`, in bond-list order.
    pub fn neighbors(&self, atom: usize) -> Option<&[usize]> {
        self.adjacency.get(atom).map(Vec::as_slice)
    }

    /// Returns the bonds as a set of ordered index pairs, convenient for
    /// order-independent comparisons.
    pub fn bond_set(&self) -> BTreeSet<(usize, usize)> {
        self.bonds.iter().map(Bond::as_pair).collect()
    }

    /// Restricts the structure to `indices`, in the given order.
    ///
    /// Atom `indices[k]` becomes atom `k` of the result. Bonds are kept only when
    /// both endpoints are retained, and are remapped into the compacted index
    /// space. The cell is carried over unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if an index is out of range or selected twice.
    pub fn subsystem(&self, indices: &[usize]) -> Result<Self, StructureError> {
        let natom = self.natom();
        let mut new_index: Vec<Option<usize>> = vec![None; natom];
        for (k, &old) in indices.iter().enumerate() {
            let slot = new_index
                .get_mut(old)
                .ok_or(StructureError::AtomOutOfRange { index: old, natom })?;
            if slot.is_some() {
                return Err(StructureError::DuplicateAtom(old));
            }
            *slot = Some(k);
        }

        let numbers = indices.iter().map(|&i| self.numbers[i]).collect();
        let positions = indices.iter().map(|&i| self.positions[i]).collect();
        let ffatypes = indices.iter().map(|&i| self.ffatypes[i].clone()).collect();
        let bonds = self
            .bonds
            .iter()
            .filter_map(|bond| match (new_index[bond.i], new_index[bond.j]) {
                (Some(a), Some(b)) => Some(Bond::new(a, b)),
                _ => None,
            })
            .collect();

        Self::new(numbers, positions, ffatypes, bonds, self.cell)
    }

    /// Replicates the structure periodically `reps[0] × reps[1] × reps[2]` times.
    ///
    /// Images are laid out with the last axis varying fastest; atom `k` of image
    /// `m` becomes atom `m * natom + k`. Bonds that cross a periodic boundary in
    /// the original cell are re-linked to the matching neighbouring image, so the
    /// replicated framework stays fully connected.
    ///
    /// # Errors
    ///
    /// Requires a non-singular cell and positive repetition counts.
    pub fn supercell(&self, reps: [usize; 3]) -> Result<Self, StructureError> {
        if reps.iter().any(|&n| n == 0) {
            return Err(StructureError::InvalidRepetition(reps));
        }
        let cell = self.cell.ok_or(StructureError::MissingCell)?;
        let gvecs = cell.gvecs().ok_or(StructureError::SingularCell)?;

        let natom = self.natom();
        let images: Vec<[usize; 3]> = (0..reps[0])
            .flat_map(|a| (0..reps[1]).flat_map(move |b| (0..reps[2]).map(move |c| [a, b, c])))
            .collect();
        let ravel = |image: [usize; 3]| (image[0] * reps[1] + image[1]) * reps[2] + image[2];

        let mut numbers = Vec::with_capacity(natom * images.len());
        let mut positions = Vec::with_capacity(natom * images.len());
        let mut ffatypes = Vec::with_capacity(natom * images.len());
        for image in &images {
            let shift: Vector3<f64> = (0..3)
                .map(|axis| cell.vector(axis) * image[axis] as f64)
                .sum();
            numbers.extend_from_slice(&self.numbers);
            positions.extend(self.positions.iter().map(|p| p + shift));
            ffatypes.extend(self.ffatypes.iter().cloned());
        }

        // Offset (in cell units) from each bond's second atom to its first.
        let moves: Vec<[i64; 3]> = self
            .bonds
            .iter()
            .map(|bond| {
                let frac = gvecs * (self.positions[bond.i] - self.positions[bond.j]);
                [0, 1, 2].map(|axis| (frac[axis] + 0.5).floor() as i64)
            })
            .collect();

        let mut bonds = Vec::with_capacity(self.bonds.len() * images.len());
        for (m, image) in images.iter().enumerate() {
            for (bond, imove) in self.bonds.iter().zip(&moves) {
                let partner = [0, 1, 2].map(|axis| {
                    (image[axis] as i64 + imove[axis]).rem_euclid(reps[axis] as i64) as usize
                });
                bonds.push(Bond::new(m * natom + bond.i, ravel(partner) * natom + bond.j));
            }
        }

        Self::new(numbers, positions, ffatypes, bonds, Some(cell.scaled(reps)))
    }

    /// Returns a copy with a different cell.
    pub fn with_cell(&self, cell: Option<Cell>) -> Self {
        Self {
            cell,
            ..self.clone()
        }
    }

    /// Returns a copy with the atoms in `range` translated by `shift`.
    pub fn translated(&self, range: Range<usize>, shift: Vector3<f64>) -> Result<Self, StructureError> {
        if range.start > range.end {
            return Err(StructureError::ReversedRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > self.natom() {
            return Err(StructureError::AtomOutOfRange {
                index: range.end.saturating_sub(1),
                natom: self.natom(),
            });
        }
        let mut moved = self.clone();
        for position in &mut moved.positions[range] {
            *position += shift;
        }
        Ok(moved)
    }

    /// Splits the bond graph into connected fragments.
    ///
    /// Each fragment lists its atoms in ascending order; fragments are ordered by
    /// their lowest atom index.
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let mut seen = vec![false; self.natom()];
        let mut components = Vec::new();

        for start in 0..self.natom() {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut component = vec![start];
            let mut queue = VecDeque::from([start]);
            while let Some(atom) = queue.pop_front() {
                for &neighbor in &self.adjacency[atom] {
                    if !seen[neighbor] {
                        seen[neighbor] = true;
                        component.push(neighbor);
                        queue.push_back(neighbor);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }

        components
    }
}
