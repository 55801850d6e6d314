use super::{load_structure, save_structure};
use crate::cli::GenerateArgs;
use crate::config::{AppConfig, build_config};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use linkmix::engine::progress::ProgressReporter;
use linkmix::workflows::generate::{GeneratedStructure, generate};
use std::path::PathBuf;
use tracing::info;

pub fn run(args: GenerateArgs, progress: &CliProgressHandler) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args)?;
    let written = execute(&config, progress)?;

    println!(
        "Generated {} structure(s) in {}",
        written.len(),
        config.output_directory.display()
    );
    Ok(())
}

/// Runs the full pipeline for `config` and writes every result.
fn execute(config: &AppConfig, progress: &CliProgressHandler) -> Result<Vec<PathBuf>> {
    let monolayer = load_structure(&config.monolayer)?;
    info!(
        seed = config.scenarios.seed,
        counts = ?config.scenarios.counts,
        "Generating scenarios."
    );

    let reporter = ProgressReporter::with_callback(progress.callback());
    let generated = generate(&monolayer, &config.stacking, &config.scenarios, &reporter)?;

    std::fs::create_dir_all(&config.output_directory)?;
    let mut written = Vec::with_capacity(generated.len());
    for GeneratedStructure {
        scenario,
        structure,
        summary,
    } in &generated
    {
        let path = config.output_path(&scenario.label);
        save_structure(structure, &path)?;
        println!("  {:<8} {} -> {}", scenario.label, summary, path.display());
        written.push(path);
    }
    Ok(written)
}
