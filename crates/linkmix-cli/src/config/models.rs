use linkmix::workflows::scenarios::ScenarioConfig;
use linkmix::workflows::stacking::StackingConfig;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub monolayer: PathBuf,
    pub output_directory: PathBuf,
    pub prefix: String,
    pub stacking: StackingConfig,
    pub scenarios: ScenarioConfig,
}

impl AppConfig {
    /// Output path of the structure generated for scenario `label`.
    pub fn output_path(&self, label: &str) -> PathBuf {
        self.output_directory
            .join(format!("{}_{}.chk", self.prefix, label))
    }
}
