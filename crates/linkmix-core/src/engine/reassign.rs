use super::error::ReassignError;
use super::progress::{Progress, ProgressReporter};
use super::tasks;
use crate::core::framework::layout::FrameworkLayout;
use crate::core::framework::tables::{DELETION_MARKER, LinkerContext};
use crate::core::models::structure::Structure;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{info, instrument};

/// Bookkeeping for one reassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignSummary {
    pub converted_units: usize,
    pub converted_atoms: usize,
    /// Number of linking units per neighbour context. Every context is present.
    pub contexts: BTreeMap<LinkerContext, usize>,
    pub deleted_atoms: usize,
    pub input_atoms: usize,
    pub output_atoms: usize,
}

impl fmt::Display for ReassignSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} donor units converted, {} atoms removed ({} -> {});",
            self.converted_units, self.deleted_atoms, self.input_atoms, self.output_atoms
        )?;
        for (context, count) in &self.contexts {
            write!(f, " {}={}", context, count)?;
        }
        Ok(())
    }
}

/// Converts the donor units listed in `targets` and retypes every linking unit.
///
/// The input structure is only borrowed; the result is a new structure with
/// the converted labels and element numbers, from which the amine hydrogens
/// of imine-linked sides have been removed. Duplicate targets count once.
///
/// # Errors
///
/// - [`ReassignError::Layout`] if `layout` does not describe `structure`.
/// - [`ReassignError::IndexRange`] if a target is not a donor unit index. This
///   is checked before any work is done.
/// - [`ReassignError::ChemistryConsistency`] if a converted atom or a linker
///   neighbour carries a label the tables do not cover.
pub fn reassign(
    structure: &Structure,
    layout: &FrameworkLayout,
    targets: &[usize],
    reporter: &ProgressReporter,
) -> Result<Structure, ReassignError> {
    reassign_with_summary(structure, layout, targets, reporter).map(|(converted, _)| converted)
}

/// Same as [`reassign`], additionally returning a [`ReassignSummary`].
#[instrument(skip_all, name = "reassign", fields(targets = targets.len()))]
pub fn reassign_with_summary(
    structure: &Structure,
    layout: &FrameworkLayout,
    targets: &[usize],
    reporter: &ProgressReporter,
) -> Result<(Structure, ReassignSummary), ReassignError> {
    layout.check(structure)?;

    let donor_units = layout.donor_unit_count();
    if let Some(&unit) = targets.iter().find(|&&unit| unit >= donor_units) {
        return Err(ReassignError::IndexRange { unit, donor_units });
    }
    let targets: BTreeSet<usize> = targets.iter().copied().collect();

    let mut numbers = structure.numbers().to_vec();
    let mut ffatypes = structure.ffatypes().to_vec();

    reporter.report(Progress::PhaseStart {
        name: "Donor Conversion",
    });
    let converted_atoms = tasks::donor_conversion::run(
        layout,
        &targets,
        &mut numbers,
        &mut ffatypes,
        reporter,
    )?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Linker Retyping",
    });
    let assigned = tasks::linker_context::run(structure, layout, &mut ffatypes, reporter)?;
    reporter.report(Progress::PhaseFinish);

    let keep: Vec<usize> = (0..structure.natom())
        .filter(|&atom| ffatypes[atom] != DELETION_MARKER)
        .collect();

    let relabelled = Structure::new(
        numbers,
        structure.positions().to_vec(),
        ffatypes,
        structure.bonds().to_vec(),
        structure.cell().copied(),
    )?;
    let converted = relabelled.subsystem(&keep)?;

    let mut contexts: BTreeMap<LinkerContext, usize> =
        LinkerContext::ALL.iter().map(|&c| (c, 0)).collect();
    for context in assigned {
        *contexts.entry(context).or_default() += 1;
    }

    let summary = ReassignSummary {
        converted_units: targets.len(),
        converted_atoms,
        contexts,
        deleted_atoms: structure.natom() - converted.natom(),
        input_atoms: structure.natom(),
        output_atoms: converted.natom(),
    };
    info!(%summary, "Reassignment complete.");

    Ok((converted, summary))
}

/// Reassigner bound to one framework layout.
#[derive(Debug, Clone, Copy)]
pub struct Reassigner {
    layout: FrameworkLayout,
}

impl Reassigner {
    pub fn new(layout: FrameworkLayout) -> Self {
        Self { layout }
    }

    /// Infers the layout from the atom count of `structure`.
    pub fn for_structure(structure: &Structure) -> Result<Self, ReassignError> {
        Ok(Self::new(FrameworkLayout::for_structure(structure)?))
    }

    pub fn layout(&self) -> &FrameworkLayout {
        &self.layout
    }

    pub fn run(
        &self,
        structure: &Structure,
        targets: &[usize],
        reporter: &ProgressReporter,
    ) -> Result<(Structure, ReassignSummary), ReassignError> {
        reassign_with_summary(structure, &self.layout, targets, reporter)
    }
}
