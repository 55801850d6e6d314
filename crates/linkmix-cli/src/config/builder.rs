use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::GenerateArgs;
use crate::error::{CliError, Result};
use std::path::PathBuf;

/// Merges the config file (if any) with command-line overrides and defaults.
/// Command-line values win over the file, the file over the defaults.
pub fn build_config(args: &GenerateArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };

    let input = file_config.input.unwrap_or_default();
    let output = file_config.output.unwrap_or_default();

    let monolayer = args.input.clone().or(input.monolayer).ok_or_else(|| {
        CliError::Config(
            "no monolayer structure given; pass --input or set `input.monolayer`".to_string(),
        )
    })?;
    let output_directory = args
        .output
        .clone()
        .or(output.directory)
        .unwrap_or_else(|| PathBuf::from(defaults.output_directory));
    let prefix = args
        .prefix
        .clone()
        .or(output.prefix)
        .unwrap_or_else(|| defaults.prefix.to_string());

    let stacking = file_config.stacking.unwrap_or_default();
    stacking
        .validate()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let mut scenarios = file_config.scenarios.unwrap_or_default();
    if let Some(seed) = args.seed {
        scenarios.seed = seed;
    }
    if let Some(counts) = &args.counts {
        scenarios.counts = counts.to_vec();
    }

    Ok(AppConfig {
        monolayer,
        output_directory,
        prefix,
        stacking,
        scenarios,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parser::parse_index_list;
    use linkmix::workflows::scenarios::{DEFAULT_COUNTS, DEFAULT_SEED};
    use std::fs;
    use tempfile::tempdir;

    fn base_args() -> GenerateArgs {
        GenerateArgs {
            config: None,
            input: None,
            output: None,
            seed: None,
            prefix: None,
            counts: None,
        }
    }

    #[test]
    fn defaults_apply_without_config_file() {
        let mut args = base_args();
        args.input = Some(PathBuf::from("PA_TP.chk"));

        let app = build_config(&args).unwrap();

        assert_eq!(app.monolayer, PathBuf::from("PA_TP.chk"));
        assert_eq!(app.output_directory, PathBuf::from("output"));
        assert_eq!(app.prefix, "ABCDEF");
        assert_eq!(app.scenarios.seed, DEFAULT_SEED);
        assert_eq!(app.scenarios.counts, DEFAULT_COUNTS.to_vec());
        assert_eq!(app.stacking.layers, 6);
        assert_eq!(
            app.output_path("full10"),
            PathBuf::from("output/ABCDEF_full10.chk")
        );
    }

    #[test]
    fn cli_overrides_win_over_file_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("generate.toml");
        fs::write(
            &path,
            r#"
            [input]
            monolayer = "from_file.chk"
            [output]
            directory = "file_out"
            prefix = "FILE"
            [scenarios]
            seed = 11
            counts = [4]
            "#,
        )
        .unwrap();

        let mut args = base_args();
        args.config = Some(path);
        args.seed = Some(99);
        args.prefix = Some("CLI".to_string());
        args.counts = Some(parse_index_list("1,2").unwrap());

        let app = build_config(&args).unwrap();

        assert_eq!(app.monolayer, PathBuf::from("from_file.chk"));
        assert_eq!(app.output_directory, PathBuf::from("file_out"));
        assert_eq!(app.prefix, "CLI");
        assert_eq!(app.scenarios.seed, 99);
        assert_eq!(app.scenarios.counts, vec![1, 2]);
    }

    #[test]
    fn missing_monolayer_is_a_config_error() {
        assert!(matches!(build_config(&base_args()), Err(CliError::Config(_))));
    }

    #[test]
    fn invalid_stacking_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[input]\nmonolayer = \"a.chk\"\n[stacking]\nrepeats = 0\n").unwrap();

        let mut args = base_args();
        args.config = Some(path);

        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn malformed_file_reports_its_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[scenarios]\nseed = \"abc\"\n").unwrap();

        let mut args = base_args();
        args.config = Some(path.clone());

        match build_config(&args) {
            Err(CliError::FileParsing { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
