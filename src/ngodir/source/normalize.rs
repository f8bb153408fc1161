//! Conversion of raw directory JSON into canonical records.

use super::SourceData;
use crate::error::{DirectoryError, Result};
use crate::model::{Contact, Record, RecordId};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawRecord {
    id: Option<Value>,
    name: Option<String>,
    description: Option<String>,
    location: Option<String>,
    #[serde(alias = "region")]
    state: Option<String>,
    services: Option<Vec<String>>,
    #[serde(alias = "focusGroups", alias = "focus_groups")]
    gender_focus: Option<Vec<String>>,
    #[serde(alias = "isFlagged", alias = "is_flagged")]
    safe_space: Option<bool>,
    phone: Option<String>,
    email: Option<String>,
    image: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn tags(values: Option<Vec<String>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

impl RawRecord {
    fn into_record(self, position: usize, region_key: Option<&str>) -> Result<Record> {
        let id = match self.id {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            None | Some(Value::Null) => Uuid::new_v4().to_string(),
            Some(Value::String(_)) => Uuid::new_v4().to_string(),
            Some(other) => {
                return Err(DirectoryError::MalformedSource(format!(
                    "record {} has an unusable id: {}",
                    position, other
                )))
            }
        };

        let region = non_blank(self.state).or_else(|| non_blank(region_key.map(str::to_string)));

        Ok(Record {
            id: RecordId(id),
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            region,
            services: tags(self.services),
            focus_groups: tags(self.gender_focus),
            is_flagged: self.safe_space.unwrap_or(false),
            contact: Contact {
                phone: non_blank(self.phone),
                email: non_blank(self.email),
            },
            image: non_blank(self.image),
        })
    }
}

fn parse_records(
    items: Vec<Value>,
    region_key: Option<&str>,
    out: &mut Vec<Record>,
) -> Result<()> {
    for item in items {
        let position = out.len();
        if !item.is_object() {
            return Err(DirectoryError::MalformedSource(format!(
                "record {} is not an object",
                position
            )));
        }
        let raw: RawRecord = serde_json::from_value(item)?;
        out.push(raw.into_record(position, region_key)?);
    }
    Ok(())
}

fn declared_services(metadata: Value) -> Vec<String> {
    metadata
        .get("serviceTypes")
        .and_then(Value::as_array)
        .map(|types| {
            types
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Parses any accepted document shape into normalized source data.
///
/// Ids must be unique; a repeated id makes the whole document malformed.
pub fn parse_document(text: &str) -> Result<SourceData> {
    let value: Value = serde_json::from_str(text)?;
    let mut records = Vec::new();
    let mut declared = Vec::new();

    match value {
        Value::Array(items) => parse_records(items, None, &mut records)?,
        Value::Object(mut doc) => {
            if let Some(metadata) = doc.remove("metadata") {
                declared = declared_services(metadata);
            }
            match doc.remove("ngos") {
                Some(Value::Array(items)) => parse_records(items, None, &mut records)?,
                Some(Value::Object(by_region)) => {
                    for (region, items) in by_region {
                        let Value::Array(items) = items else {
                            return Err(DirectoryError::MalformedSource(format!(
                                "region '{}' does not hold a list",
                                region
                            )));
                        };
                        parse_records(items, Some(&region), &mut records)?;
                    }
                }
                _ => {
                    return Err(DirectoryError::MalformedSource(
                        "expected an `ngos` list or region map".to_string(),
                    ))
                }
            }
        }
        _ => {
            return Err(DirectoryError::MalformedSource(
                "expected a list of records or an object".to_string(),
            ))
        }
    }

    check_unique(&records)?;

    Ok(SourceData {
        records,
        declared_services: declared,
    })
}

pub fn check_unique(records: &[Record]) -> Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(&record.id) {
            return Err(DirectoryError::DuplicateId(record.id.to_string()));
        }
    }
    Ok(())
}
