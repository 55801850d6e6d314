use super::{load_structure, save_structure};
use crate::cli::ConvertArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use linkmix::engine::progress::ProgressReporter;
use linkmix::engine::reassign::Reassigner;
use tracing::info;

pub fn run(args: ConvertArgs, progress: &CliProgressHandler) -> Result<()> {
    let structure = load_structure(&args.input)?;
    let targets = args.targets.map(|t| t.into_inner()).unwrap_or_default();

    let reassigner = Reassigner::for_structure(&structure)?;
    info!(
        donor_units = reassigner.layout().donor_unit_count(),
        targets = ?targets,
        "Converting donor units."
    );

    let reporter = ProgressReporter::with_callback(progress.callback());
    let (converted, summary) = reassigner.run(&structure, &targets, &reporter)?;

    save_structure(&converted, &args.output)?;
    println!("{}", summary);
    println!("Converted structure written to: {}", args.output.display());
    Ok(())
}
