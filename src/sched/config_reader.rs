use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use std::fs;

use crate::sched::{OpeningConfigSnafu, ParsingConfigSnafu, SchedResult};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetNames {
    pub responses: String,
    pub records: String,
}

/// The configuration document. It names the credential file, the
/// workbook and the two worksheets holding the responses and the
/// records. The caller reads it once and hands the struct to
/// [`crate::sched::run`]; nothing else looks at the file system for
/// configuration.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// The source adapter to use: `xlsx` (default) or `csv`.
    #[serde(default = "default_provider")]
    pub provider: String,
    pub api_key_path: String,
    pub workbook_path: String,
    pub worksheets: WorksheetNames,
}

fn default_provider() -> String {
    "xlsx".to_string()
}

pub fn read_config(path: &str) -> SchedResult<AppConfig> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    let config: AppConfig =
        serde_json::from_str(&contents).context(ParsingConfigSnafu { path })?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parses_with_explicit_provider() {
        let doc = r#"{
            "provider": "csv",
            "api_key_path": "k.json",
            "workbook_path": "data",
            "worksheets": {"responses": "R", "records": "Rec"}
        }"#;
        let config: AppConfig = serde_json::from_str(doc).unwrap();
        assert_eq!(config.provider, "csv");
        assert_eq!(config.api_key_path, "k.json");
        assert_eq!(config.worksheets.responses, "R");
        assert_eq!(config.worksheets.records, "Rec");
    }

    #[test]
    fn provider_defaults_to_xlsx() {
        let doc = r#"{
            "api_key_path": "k.json",
            "workbook_path": "Snow Data.xlsx",
            "worksheets": {"responses": "Responses", "records": "Records"}
        }"#;
        let config: AppConfig = serde_json::from_str(doc).unwrap();
        assert_eq!(config.provider, "xlsx");
    }

    #[test]
    fn malformed_config_is_an_error() {
        let res: Result<AppConfig, _> = serde_json::from_str("{\"api_key_path\": 3}");
        assert!(res.is_err());
    }
}
