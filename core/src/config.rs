use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything a deployment may tune. Every field has a default so a partial
/// JSON file is enough.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub fields: RecordFields,
    pub report: ReportOptions,
    pub detector: DetectorConfig,
}

/// Source-label tables used by the entry classifier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Monitor number -> display label. Numbers missing here render as
    /// `Monitor <N>`.
    pub monitor_labels: BTreeMap<u32, String>,
    pub cap_label: String,
    pub ipaws_label: String,
    pub station_code: String,
    pub station_label: String,
    pub unknown_label: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let mut monitor_labels = BTreeMap::new();
        monitor_labels.insert(1, "LP-1".to_string());
        monitor_labels.insert(2, "LP-2".to_string());
        monitor_labels.insert(3, "NWS".to_string());

        Self {
            monitor_labels,
            cap_label: "CAP".to_string(),
            ipaws_label: "IPAWS (CAP)".to_string(),
            station_code: "Station".to_string(),
            station_label: "Station Log".to_string(),
            unknown_label: "Unknown".to_string(),
        }
    }
}

/// Key names of the raw record fields the classifier reads.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RecordFields {
    pub direction: String,
    pub code: String,
    pub details: String,
    pub date_time: String,
}

impl Default for RecordFields {
    fn default() -> Self {
        Self {
            direction: "Direction".to_string(),
            code: "Code".to_string(),
            details: "Details".to_string(),
            date_time: "DateTime".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReportOptions {
    pub title: String,
    pub station_placeholder: String,
    pub signature_placeholder: String,
    pub first_column_width: u16,
    pub column_width: u16,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "EAS Compliance Log".to_string(),
            station_placeholder: "Station: ____________________".to_string(),
            signature_placeholder: "____________________".to_string(),
            first_column_width: 34,
            column_width: 22,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DetectorConfig {
    pub markers: Vec<String>,
    pub min_hits: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        let markers = [
            "ENDEC",
            "Sage",
            "-RWT-",
            "-RMT-",
            "Required Weekly Test",
            "Required Monthly Test",
            "Received on Monitor",
            "Received from CAP",
        ];
        Self {
            markers: markers.iter().map(|m| m.to_string()).collect(),
            min_hits: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "classifier": { "monitor_labels": { "4": "WXYZ-FM" } } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.classifier.monitor_labels.get(&4).map(String::as_str), Some("WXYZ-FM"));
        assert_eq!(config.classifier.monitor_labels.len(), 1);
        assert_eq!(config.classifier.cap_label, "CAP");
        assert_eq!(config.fields, RecordFields::default());
        assert_eq!(config.detector.min_hits, 1);
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = AppConfig::default();
        let text = serde_json::to_string_pretty(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
