use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl OutputConfig {
    /// Envelopes default to single-line JSON; SCOUT_OUTPUT_FORMAT=text
    /// and SCOUT_OUTPUT_PRETTY=1 are debugging overrides.
    pub fn from_env() -> Self {
        let format = match env::var("SCOUT_OUTPUT_FORMAT").ok().as_deref() {
            Some("text") => OutputFormat::Text,
            _ => OutputFormat::Json,
        };
        let pretty = matches!(
            env::var("SCOUT_OUTPUT_PRETTY").ok().as_deref(),
            Some("1") | Some("true") | Some("yes")
        );
        OutputConfig { format, pretty }
    }
}
