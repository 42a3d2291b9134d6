use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::error::ComplianceError;
use crate::model::record::RawRecord;
use crate::repository::traits::RecordSource;

/// Locates the record list inside a decoded XML-to-object tree.
///
/// The longest array of objects anywhere in the tree wins (first one on ties).
/// A lone object carrying `direction_field` counts as a single record, since
/// converters collapse one-element lists.
pub fn discover_records(root: &Value, direction_field: &str) -> Vec<RawRecord> {
    let mut best: Option<&Vec<Value>> = None;
    let mut single: Option<&serde_json::Map<String, Value>> = None;
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        match node {
            Value::Array(items) => {
                let objects = items.iter().filter(|v| v.is_object()).count();
                if objects > 0 && best.map(|b| objects > count_objects(b)).unwrap_or(true) {
                    best = Some(items);
                }
                stack.extend(items.iter().rev());
            }
            Value::Object(map) => {
                if single.is_none() && RawRecord::new(map.clone()).has(direction_field) {
                    single = Some(map);
                }
                // Reverse so the first child is visited first.
                let children: Vec<&Value> = map.values().collect();
                stack.extend(children.into_iter().rev());
            }
            _ => {}
        }
    }

    if let Some(items) = best {
        return items
            .iter()
            .filter_map(|v| v.as_object())
            .map(|m| RawRecord::new(m.clone()))
            .collect();
    }
    single.map(|m| vec![RawRecord::new(m.clone())]).unwrap_or_default()
}

fn count_objects(items: &[Value]) -> usize {
    items.iter().filter(|v| v.is_object()).count()
}

/// Reads a JSON file holding the decoded device log.
pub struct JsonRecordSource {
    path: PathBuf,
    direction_field: String,
}

impl JsonRecordSource {
    pub fn new(path: impl Into<PathBuf>, direction_field: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction_field: direction_field.into(),
        }
    }
}

impl RecordSource for JsonRecordSource {
    fn records(&self) -> Result<Vec<RawRecord>, ComplianceError> {
        let path = self.path.display().to_string();
        let content = fs::read_to_string(&self.path).map_err(|source| ComplianceError::Io {
            path: path.clone(),
            source,
        })?;
        let root: Value = serde_json::from_str(&content).map_err(|source| ComplianceError::Json {
            path: path.clone(),
            source,
        })?;
        let records = discover_records(&root, &self.direction_field);
        debug!(path = %self.path.display(), count = records.len(), "discovered raw records");

        if records.is_empty() {
            return Err(ComplianceError::EmptyInput(Some(path)));
        }
        Ok(records)
    }
}
