use super::error::WorkflowError;
use super::scenarios::{Scenario, ScenarioConfig};
use super::stacking::{StackingConfig, build_stacked_framework};
use crate::core::framework::layout::FrameworkLayout;
use crate::core::models::structure::Structure;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::reassign::{ReassignSummary, reassign_with_summary};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One converted framework together with the scenario that produced it.
#[derive(Debug, Clone)]
pub struct GeneratedStructure {
    pub scenario: Scenario,
    pub structure: Structure,
    pub summary: ReassignSummary,
}

/// Converts `base` once per scenario.
///
/// Scenarios are independent and run in parallel when the `parallel` feature
/// is enabled. Results come back in scenario order. The first failing
/// scenario aborts the batch.
#[instrument(skip_all, name = "generate_workflow", fields(scenarios = scenarios.len()))]
pub fn run(
    base: &Structure,
    layout: &FrameworkLayout,
    scenarios: &[Scenario],
    reporter: &ProgressReporter,
) -> Result<Vec<GeneratedStructure>, WorkflowError> {
    reporter.report(Progress::PhaseStart {
        name: "Converting Scenarios",
    });
    reporter.report(Progress::TaskStart {
        total_steps: scenarios.len() as u64,
    });

    let convert = |scenario: &Scenario| -> Result<GeneratedStructure, WorkflowError> {
        let silent = ProgressReporter::new();
        let (structure, summary) = reassign_with_summary(base, layout, &scenario.targets, &silent)
            .map_err(|source| WorkflowError::Scenario {
                label: scenario.label.clone(),
                source,
            })?;
        reporter.report(Progress::Message(format!("{}: {}", scenario.label, summary)));
        reporter.report(Progress::TaskIncrement);
        Ok(GeneratedStructure {
            scenario: scenario.clone(),
            structure,
            summary,
        })
    };

    #[cfg(not(feature = "parallel"))]
    let generated: Result<Vec<_>, WorkflowError> = scenarios.iter().map(convert).collect();

    #[cfg(feature = "parallel")]
    let generated: Result<Vec<_>, WorkflowError> = scenarios.par_iter().map(convert).collect();

    let generated = generated?;
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    info!(count = generated.len(), "Generated all scenarios.");
    Ok(generated)
}

/// Stacks `monolayer`, plans the scenarios and converts each of them.
#[instrument(skip_all, name = "generate_from_monolayer")]
pub fn generate(
    monolayer: &Structure,
    stacking: &StackingConfig,
    scenarios: &ScenarioConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<GeneratedStructure>, WorkflowError> {
    reporter.report(Progress::PhaseStart {
        name: "Stacking Layers",
    });
    let base = build_stacked_framework(monolayer, stacking)?;
    let layout = FrameworkLayout::for_structure(&base)?;
    reporter.report(Progress::PhaseFinish);

    let plan = scenarios.plan(layout.donor_unit_count())?;
    for scenario in &plan {
        info!(%scenario, targets = ?scenario.targets, "Scheduled scenario.");
    }
    run(&base, &layout, &plan, reporter)
}
