//! Synthetic TP-PA frameworks for tests.
//!
//! Geometry is a simple line of atoms; only the labels, element numbers and
//! the bond graph follow the real framework. Every node exposes three
//! `C_HCN_TP` carbons and every linker nitrogen is bonded to exactly one of
//! them, so each node bridges three linker nitrogens.

use super::layout::{CELL_ATOMS, FrameworkLayout};
use super::tables::{LINKER_POSITIONS, LinkerContext};
use crate::core::models::cell::Cell;
use crate::core::models::structure::Structure;
use crate::core::models::topology::Bond;
use nalgebra::Point3;

const DONOR_LABELS: [(&str, u8); 5] = [
    ("C_C3_TP", 6),
    ("C_C2O_TP", 6),
    ("O_TP", 8),
    ("C_HCN_TP", 6),
    ("H_C_CN_TP", 1),
];

const LINKER_NUMBERS: [u8; LINKER_POSITIONS] = [6, 6, 6, 6, 6, 6, 1, 1, 1, 1, 7, 7, 1, 1];

/// Atom index of the `k`-th atom of kind `kind` (index into `DONOR_LABELS`)
/// inside a donor unit starting at `start`.
fn donor_atom(start: usize, kind: usize, k: usize) -> usize {
    start + 3 * kind + k
}

/// Builds a pristine framework of `cells` repeat cells with a periodic cell
/// spanning the atom line.
pub(crate) fn synthetic_framework(cells: usize) -> Structure {
    let layout = FrameworkLayout::new(cells).unwrap();
    let natom = layout.atom_count();
    let mut numbers = vec![0u8; natom];
    let mut ffatypes = vec![String::new(); natom];
    let mut bonds = Vec::new();

    for unit in 0..layout.donor_unit_count() {
        let start = layout.donor_unit_atoms(unit).unwrap().start;
        for (kind, (label, number)) in DONOR_LABELS.iter().enumerate() {
            for k in 0..3 {
                let atom = donor_atom(start, kind, k);
                numbers[atom] = *number;
                ffatypes[atom] = label.to_string();
            }
        }
        for k in 0..3 {
            let ring = donor_atom(start, 0, k);
            let keto = donor_atom(start, 1, k);
            bonds.push(Bond::new(ring, keto));
            bonds.push(Bond::new(ring, donor_atom(start, 1, (k + 1) % 3)));
            bonds.push(Bond::new(keto, donor_atom(start, 2, k)));
            bonds.push(Bond::new(ring, donor_atom(start, 3, k)));
            bonds.push(Bond::new(donor_atom(start, 3, k), donor_atom(start, 4, k)));
        }
    }

    for unit in 0..layout.linker_unit_count() {
        let start = layout.linker_unit_atoms(unit).unwrap().start;
        for position in 0..LINKER_POSITIONS {
            numbers[start + position] = LINKER_NUMBERS[position];
            ffatypes[start + position] = LinkerContext::Pa11
                .label_for(position)
                .unwrap()
                .to_string();
        }
        let local = |a: usize, b: usize| Bond::new(start + a, start + b);
        bonds.extend([
            local(0, 2),
            local(2, 3),
            local(3, 1),
            local(1, 4),
            local(4, 5),
            local(5, 0),
            local(2, 6),
            local(3, 7),
            local(4, 8),
            local(5, 9),
            local(0, 10),
            local(1, 11),
            local(11, 12),
            local(10, 13),
        ]);

        // Nitrogen 10 reaches donor slot 2p, nitrogen 11 slot 2p + 1; slot s is
        // imine carbon s % 3 of donor unit s / 3.
        for (side, nitrogen) in [10, 11].into_iter().enumerate() {
            let slot = 2 * unit + side;
            let donor_start = layout.donor_unit_atoms(slot / 3).unwrap().start;
            bonds.push(Bond::new(
                start + nitrogen,
                donor_atom(donor_start, 3, slot % 3),
            ));
        }
    }

    let positions = (0..natom)
        .map(|i| Point3::new(0.5 * i as f64, 0.25 * (i % 7) as f64, 0.125 * (i % 3) as f64))
        .collect();
    let length = 0.5 * natom as f64;
    let cell = Cell::from_rows([
        [length, 0.0, 0.0],
        [0.0, 10.0 * CELL_ATOMS as f64, 0.0],
        [0.0, 0.0, 10.0 * CELL_ATOMS as f64],
    ]);

    Structure::new(numbers, positions, ffatypes, bonds, Some(cell)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::framework::tables::NITROGEN_POSITIONS;

    #[test]
    fn every_imine_carbon_bridges_exactly_one_nitrogen() {
        let structure = synthetic_framework(2);
        for (atom, label) in structure.ffatypes().iter().enumerate() {
            if label == "C_HCN_TP" {
                let nitrogens = structure
                    .neighbors(atom)
                    .unwrap()
                    .iter()
                    .filter(|&&n| structure.numbers()[n] == 7)
                    .count();
                assert_eq!(nitrogens, 1, "atom {}", atom);
            }
        }
    }

    #[test]
    fn linker_nitrogens_have_one_outside_neighbour() {
        let structure = synthetic_framework(2);
        let layout = FrameworkLayout::for_structure(&structure).unwrap();
        for unit in 0..layout.linker_unit_count() {
            let atoms = layout.linker_unit_atoms(unit).unwrap();
            for position in NITROGEN_POSITIONS {
                let outside: Vec<_> = structure
                    .neighbors(atoms.start + position)
                    .unwrap()
                    .iter()
                    .filter(|n| !atoms.contains(n))
                    .collect();
                assert_eq!(outside.len(), 1);
            }
        }
    }
}
