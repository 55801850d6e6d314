use crate::core::framework::layout::FrameworkLayout;
use crate::core::framework::tables::{DONOR_SUBSTITUTIONS, MotifFamily};
use crate::engine::error::ReassignError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::collections::BTreeSet;
use tracing::{debug, instrument, trace};

/// Relabels every atom of the targeted donor units with its acceptor-family
/// counterpart, updating the element where the table requires it.
///
/// Returns the number of atoms that were relabelled.
#[instrument(skip_all, name = "donor_conversion_task")]
pub fn run(
    layout: &FrameworkLayout,
    targets: &BTreeSet<usize>,
    numbers: &mut [u8],
    ffatypes: &mut [String],
    reporter: &ProgressReporter,
) -> Result<usize, ReassignError> {
    reporter.report(Progress::TaskStart {
        total_steps: targets.len() as u64,
    });

    let mut converted = 0;
    for &unit in targets {
        let atoms = layout
            .donor_unit_atoms(unit)
            .ok_or(ReassignError::IndexRange {
                unit,
                donor_units: layout.donor_unit_count(),
            })?;

        for atom in atoms {
            let label = &ffatypes[atom];
            if MotifFamily::of_label(label) != Some(MotifFamily::Donor) {
                return Err(ReassignError::ChemistryConsistency {
                    unit,
                    atom,
                    label: label.clone(),
                    detail: format!(
                        "expected a donor-family label ending in '_{}'",
                        MotifFamily::Donor.suffix()
                    ),
                });
            }
            let substitution =
                DONOR_SUBSTITUTIONS
                    .get(label.as_str())
                    .ok_or_else(|| ReassignError::ChemistryConsistency {
                        unit,
                        atom,
                        label: label.clone(),
                        detail: "no acceptor counterpart is defined for this label".to_string(),
                    })?;

            if substitution.label == label.as_str() {
                return Err(ReassignError::Internal(format!(
                    "substitution for '{}' leaves the label unchanged",
                    label
                )));
            }

            trace!(atom, from = %label, to = substitution.label, "Relabelling donor atom.");
            if let Some(number) = substitution.atomic_number {
                numbers[atom] = number;
            }
            ffatypes[atom] = substitution.label.to_string();
            converted += 1;
        }

        debug!(unit, "Converted donor unit.");
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::framework::fixtures::synthetic_framework;

    fn working_copy(cells: usize) -> (FrameworkLayout, Vec<u8>, Vec<String>) {
        let structure = synthetic_framework(cells);
        let layout = FrameworkLayout::for_structure(&structure).unwrap();
        (
            layout,
            structure.numbers().to_vec(),
            structure.ffatypes().to_vec(),
        )
    }

    #[test]
    fn converts_only_the_targeted_units() {
        let (layout, mut numbers, mut ffatypes) = working_copy(2);
        let targets = BTreeSet::from([1]);

        let converted = run(
            &layout,
            &targets,
            &mut numbers,
            &mut ffatypes,
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(converted, 15);
        for atom in layout.donor_unit_atoms(1).unwrap() {
            assert_eq!(MotifFamily::of_label(&ffatypes[atom]), Some(MotifFamily::Acceptor));
        }
        for unit in [0, 2, 3] {
            for atom in layout.donor_unit_atoms(unit).unwrap() {
                assert_eq!(MotifFamily::of_label(&ffatypes[atom]), Some(MotifFamily::Donor));
            }
        }
    }

    #[test]
    fn carbonyl_oxygens_become_hydrogens() {
        let (layout, mut numbers, mut ffatypes) = working_copy(1);
        let oxygens: Vec<_> = layout
            .donor_unit_atoms(0)
            .unwrap()
            .filter(|&a| ffatypes[a] == "O_TP")
            .collect();
        assert_eq!(oxygens.len(), 3);

        run(
            &layout,
            &BTreeSet::from([0]),
            &mut numbers,
            &mut ffatypes,
            &ProgressReporter::new(),
        )
        .unwrap();

        for atom in oxygens {
            assert_eq!(numbers[atom], 1);
            assert_eq!(ffatypes[atom], "H_C_C2_TPB");
        }
    }

    #[test]
    fn already_converted_unit_is_rejected() {
        let (layout, mut numbers, mut ffatypes) = working_copy(1);
        let targets = BTreeSet::from([0]);
        let reporter = ProgressReporter::new();
        run(&layout, &targets, &mut numbers, &mut ffatypes, &reporter).unwrap();

        let err = run(&layout, &targets, &mut numbers, &mut ffatypes, &reporter).unwrap_err();
        assert!(matches!(
            err,
            ReassignError::ChemistryConsistency { unit: 0, atom: 0, .. }
        ));
    }

    #[test]
    fn unknown_donor_label_is_rejected() {
        let (layout, mut numbers, mut ffatypes) = working_copy(1);
        ffatypes[60] = "N_X_TP".to_string();

        let err = run(
            &layout,
            &BTreeSet::from([1]),
            &mut numbers,
            &mut ffatypes,
            &ProgressReporter::new(),
        )
        .unwrap_err();

        match err {
            ReassignError::ChemistryConsistency { unit, atom, label, .. } => {
                assert_eq!((unit, atom, label.as_str()), (1, 60, "N_X_TP"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
