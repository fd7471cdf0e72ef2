//! Query parameter types for list and export endpoints.

use serde::de::{self, Deserializer};
use serde::Deserialize;

/// `GET /api/inspections?section_id=&limit=`
#[derive(Debug, Deserialize)]
pub struct InspectionListParams {
    pub section_id: Option<String>,
    pub limit: Option<i64>,
}

/// `GET /api/alerts?only_open=`. Defaults to open alerts only.
#[derive(Debug, Deserialize)]
pub struct AlertListParams {
    #[serde(default = "default_only_open", deserialize_with = "deserialize_flag")]
    pub only_open: bool,
}

fn default_only_open() -> bool {
    true
}

/// `GET /api/export/inspections?limit=`
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub limit: Option<i64>,
}

/// Parse a boolean query flag, accepting the spellings existing clients
/// send (`1/0`, `yes/no`, `on/off`, `t/f`, `y/n`), case-insensitively.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        _ => Err(de::Error::invalid_value(
            de::Unexpected::Str(&raw),
            &"a boolean (true/false, 1/0, yes/no, on/off)",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_open(query: &str) -> Result<bool, serde_json::Error> {
        serde_json::from_value::<AlertListParams>(serde_json::json!({ "only_open": query }))
            .map(|p| p.only_open)
    }

    #[test]
    fn flag_accepts_numeric_and_word_spellings() {
        for raw in ["1", "true", "True", "yes", "on", "t", "y"] {
            assert!(only_open(raw).unwrap(), "{raw}");
        }
        for raw in ["0", "false", "FALSE", "no", "off", "f", "n"] {
            assert!(!only_open(raw).unwrap(), "{raw}");
        }
    }

    #[test]
    fn flag_rejects_other_text() {
        assert!(only_open("maybe").is_err());
    }

    #[test]
    fn flag_defaults_to_open_only() {
        let params: AlertListParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(params.only_open);
    }
}
