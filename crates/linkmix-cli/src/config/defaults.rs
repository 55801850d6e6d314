pub struct DefaultsConfig {
    pub output_directory: &'static str,
    pub prefix: &'static str,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_directory: "output",
            prefix: "ABCDEF",
        }
    }
}
