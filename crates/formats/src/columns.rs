use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Header names for each input column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub department: String,
    pub emission: String,
    pub trip_id: String,
    pub purpose: String,
    pub transport_mode: String,
    pub origin_city: String,
    pub destination_city: String,
    pub net_cost: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            department: "department".into(),
            emission: "emission_kg".into(),
            trip_id: "trip_id".into(),
            purpose: "purpose".into(),
            transport_mode: "transport_mode".into(),
            origin_city: "origin_city".into(),
            destination_city: "destination_city".into(),
            net_cost: "net_cost".into(),
        }
    }
}

impl ColumnMap {
    pub fn from_json_str(payload: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Resolve header names to positions. Only department and emission are required.
    pub(crate) fn resolve(&self, headers: &csv::StringRecord) -> Result<ColumnIndex, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let required = |name: &str| {
            find(name).ok_or_else(|| LoadError::MissingColumn {
                column: name.to_string(),
            })
        };
        Ok(ColumnIndex {
            department: required(&self.department)?,
            emission: required(&self.emission)?,
            trip_id: find(&self.trip_id),
            purpose: find(&self.purpose),
            transport_mode: find(&self.transport_mode),
            origin_city: find(&self.origin_city),
            destination_city: find(&self.destination_city),
            net_cost: find(&self.net_cost),
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ColumnIndex {
    pub department: usize,
    pub emission: usize,
    pub trip_id: Option<usize>,
    pub purpose: Option<usize>,
    pub transport_mode: Option<usize>,
    pub origin_city: Option<usize>,
    pub destination_city: Option<usize>,
    pub net_cost: Option<usize>,
}
