use crate::core::framework::layout::FrameworkLayout;
use crate::core::framework::tables::{
    DELETION_MARKER, LINKER_POSITIONS, LinkerContext, MotifFamily, NITROGEN_POSITIONS,
    label_suffix,
};
use crate::core::models::structure::Structure;
use crate::engine::error::ReassignError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::ops::Range;
use tracing::{debug, instrument, trace};

/// Determines the family of the node bonded to `nitrogen`.
///
/// Bond partners inside the linking unit itself are skipped; the first
/// remaining partner decides. Labels are read from `ffatypes`, so donor
/// conversion must already have been applied.
fn classify_side(
    structure: &Structure,
    ffatypes: &[String],
    unit: usize,
    unit_atoms: &Range<usize>,
    nitrogen: usize,
) -> Result<MotifFamily, ReassignError> {
    let partner = structure
        .neighbors(nitrogen)
        .unwrap_or_default()
        .iter()
        .copied()
        .find(|neighbor| !unit_atoms.contains(neighbor))
        .ok_or_else(|| ReassignError::ChemistryConsistency {
            unit,
            atom: nitrogen,
            label: ffatypes[nitrogen].clone(),
            detail: "nitrogen is not bonded to any atom outside its linking unit".to_string(),
        })?;

    MotifFamily::of_label(&ffatypes[partner]).ok_or_else(|| ReassignError::ChemistryConsistency {
        unit,
        atom: nitrogen,
        label: ffatypes[nitrogen].clone(),
        detail: format!(
            "bonded node atom {} has label '{}' of neither the TP nor the TPB family",
            partner, ffatypes[partner]
        ),
    })
}

/// Computes the neighbour context of linking unit `unit`.
pub fn context_of(
    structure: &Structure,
    layout: &FrameworkLayout,
    ffatypes: &[String],
    unit: usize,
) -> Result<LinkerContext, ReassignError> {
    let atoms = layout
        .linker_unit_atoms(unit)
        .ok_or_else(|| ReassignError::Internal(format!("linking unit {} is out of range", unit)))?;
    let [first, second] = NITROGEN_POSITIONS
        .map(|position| classify_side(structure, ffatypes, unit, &atoms, atoms.start + position));
    Ok(LinkerContext::from_families(first?, second?))
}

/// Retypes every linking unit from its neighbour context.
///
/// Returns the context assigned to each unit, indexed by unit. Atoms the
/// context removes are labelled [`DELETION_MARKER`].
#[instrument(skip_all, name = "linker_context_task")]
pub fn run(
    structure: &Structure,
    layout: &FrameworkLayout,
    ffatypes: &mut [String],
    reporter: &ProgressReporter,
) -> Result<Vec<LinkerContext>, ReassignError> {
    let total = layout.linker_unit_count();
    reporter.report(Progress::TaskStart {
        total_steps: total as u64,
    });

    let mut contexts = Vec::with_capacity(total);
    for unit in 0..total {
        let context = context_of(structure, layout, ffatypes, unit)?;
        let atoms = layout
            .linker_unit_atoms(unit)
            .ok_or_else(|| ReassignError::Internal(format!("linking unit {} is out of range", unit)))?;

        for (position, atom) in atoms.enumerate() {
            let label = context.label_for(position).ok_or_else(|| {
                ReassignError::Internal(format!(
                    "position {} exceeds the {} positions of a linking unit",
                    position, LINKER_POSITIONS
                ))
            })?;
            if label != DELETION_MARKER && label_suffix(label) != context.label_suffix() {
                return Err(ReassignError::Internal(format!(
                    "label '{}' for position {} does not belong to context {}",
                    label, position, context
                )));
            }
            trace!(atom, position, to = label, "Retyping linker atom.");
            ffatypes[atom] = label.to_string();
        }

        debug!(unit, %context, "Retyped linking unit.");
        contexts.push(context);
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    Ok(contexts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::framework::fixtures::synthetic_framework;

    #[test]
    fn pristine_framework_is_all_keto_enamine() {
        let structure = synthetic_framework(2);
        let layout = FrameworkLayout::for_structure(&structure).unwrap();
        let mut ffatypes = structure.ffatypes().to_vec();

        let contexts = run(&structure, &layout, &mut ffatypes, &ProgressReporter::new()).unwrap();

        assert_eq!(contexts, vec![LinkerContext::Pa11; 6]);
        assert_eq!(ffatypes, structure.ffatypes());
    }

    #[test]
    fn context_reads_each_nitrogen_side_separately() {
        let structure = synthetic_framework(1);
        let layout = FrameworkLayout::for_structure(&structure).unwrap();
        let mut ffatypes = structure.ffatypes().to_vec();
        // Linker 0 bridges donor slots 0 and 1, both on donor unit 0: the
        // imine carbons are atoms 9 and 10 of that unit.
        ffatypes[10] = "C_HCN_C3_TPB".to_string();

        assert_eq!(
            context_of(&structure, &layout, &ffatypes, 0).unwrap(),
            LinkerContext::Pa12
        );

        ffatypes[9] = "C_HCN_C3_TPB".to_string();
        ffatypes[10] = "C_HCN_TP".to_string();
        assert_eq!(
            context_of(&structure, &layout, &ffatypes, 0).unwrap(),
            LinkerContext::Pa21
        );
    }

    #[test]
    fn mixed_context_deletes_one_amine_hydrogen() {
        let structure = synthetic_framework(1);
        let layout = FrameworkLayout::for_structure(&structure).unwrap();
        let mut ffatypes = structure.ffatypes().to_vec();
        ffatypes[10] = "C_HCN_C3_TPB".to_string();

        let contexts = run(&structure, &layout, &mut ffatypes, &ProgressReporter::new()).unwrap();

        assert_eq!(contexts[0], LinkerContext::Pa12);
        let start = layout.linker_unit_atoms(0).unwrap().start;
        assert_eq!(ffatypes[start + 12], DELETION_MARKER);
        assert_eq!(ffatypes[start + 13], "H_N_0_PA12");
        assert_eq!(ffatypes[start + 11], "N_C2_PA12");
    }

    #[test]
    fn unknown_neighbour_family_is_a_chemistry_error() {
        let structure = synthetic_framework(1);
        let layout = FrameworkLayout::for_structure(&structure).unwrap();
        let mut ffatypes = structure.ffatypes().to_vec();
        ffatypes[9] = "C_HCN_XYZ".to_string();

        let err = run(&structure, &layout, &mut ffatypes, &ProgressReporter::new()).unwrap_err();

        assert!(matches!(
            err,
            ReassignError::ChemistryConsistency { unit: 0, atom: 25, .. }
        ));
    }
}
