//! Records exchanged with the target repository and position source

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{CorrectedPosition, GeoPoint, Target, ViewerState, STANDARD_GPS_ACCURACY_M};
use crate::validation::PositionValidator;

/// Errors turning external records into core types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// Row cannot be identified
    #[error("Record at index {index} has an empty id")]
    MissingId { index: usize },
    /// Repository payload is not a list of records
    #[error("Failed to parse target records: {message}")]
    Payload { message: String },
    /// One row does not match the record shape
    #[error("Failed to parse record at index {index}: {message}")]
    Parse { index: usize, message: String },
    /// Interaction radius is negative or not a number
    #[error("Record '{id}' has an invalid range of {range_meters} m")]
    InvalidRange { id: String, range_meters: f64 },
    /// Correction request outside the valid coordinate range
    #[error("Invalid correction request ({latitude}, {longitude}): {reason}")]
    InvalidRequest {
        latitude: f64,
        longitude: f64,
        reason: String,
    },
}

/// Deployed-agent row as stored by the repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub object_type: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, alias = "preciselatitude", skip_serializing_if = "Option::is_none")]
    pub precise_latitude: Option<f64>,
    #[serde(default, alias = "preciselongitude", skip_serializing_if = "Option::is_none")]
    pub precise_longitude: Option<f64>,
    #[serde(default, alias = "precisealtitude", skip_serializing_if = "Option::is_none")]
    pub precise_altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, alias = "correctionapplied", skip_serializing_if = "Option::is_none")]
    pub correction_applied: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_meters: Option<f64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl TargetRecord {
    /// Convert into a core target
    ///
    /// The corrected overlay exists only when both precise coordinates are
    /// present; a lone precise latitude or longitude is ignored.
    pub fn into_target(self, default_radius_m: f64) -> Target {
        let mut position = GeoPoint::new(self.latitude, self.longitude);
        position.altitude_m = self.altitude;

        let corrected = match (self.precise_latitude, self.precise_longitude) {
            (Some(lat), Some(lon)) => {
                let mut point = GeoPoint::new(lat, lon);
                point.altitude_m = self.precise_altitude;
                Some(CorrectedPosition {
                    point,
                    accuracy_m: self.accuracy.unwrap_or(STANDARD_GPS_ACCURACY_M),
                    correction_applied: self.correction_applied.unwrap_or(false),
                })
            }
            _ => None,
        };

        let label = if self.name.is_empty() { self.id.clone() } else { self.name };

        Target {
            id: self.id,
            label,
            position,
            corrected,
            reported_accuracy_m: self.accuracy,
            display_radius_m: self.range_meters.unwrap_or(default_radius_m),
            category: self.object_type,
        }
    }
}

/// Active targets in repository order, plus rows that could not be used
pub fn active_targets(records: Vec<TargetRecord>, default_radius_m: f64) -> (Vec<Target>, Vec<RecordError>) {
    let mut targets = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        if !record.is_active {
            continue;
        }
        if record.id.trim().is_empty() {
            rejected.push(RecordError::MissingId { index });
            continue;
        }
        if let Some(range_meters) = record.range_meters {
            if !range_meters.is_finite() || range_meters < 0.0 {
                rejected.push(RecordError::InvalidRange { id: record.id, range_meters });
                continue;
            }
        }
        targets.push(record.into_target(default_radius_m));
    }

    (targets, rejected)
}

/// Parse a JSON array of repository rows
///
/// Rows are decoded one at a time so a malformed row is reported on its own
/// while the rest still load. Only a payload that is not a JSON array fails
/// as a whole.
pub fn load_targets_json(json: &str) -> Result<(Vec<TargetRecord>, Vec<RecordError>), RecordError> {
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| RecordError::Payload { message: e.to_string() })?;

    let mut records = Vec::with_capacity(rows.len());
    let mut rejected = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<TargetRecord>(row) {
            Ok(record) => records.push(record),
            Err(e) => rejected.push(RecordError::Parse { index, message: e.to_string() }),
        }
    }

    Ok((records, rejected))
}

/// Reject coordinates a correction service would refuse
pub fn validate_correction_request(latitude: f64, longitude: f64) -> Result<GeoPoint, RecordError> {
    let point = GeoPoint::new(latitude, longitude);
    PositionValidator::check_point(&point).map_err(|reason| RecordError::InvalidRequest {
        latitude,
        longitude,
        reason: reason.to_string(),
    })?;
    Ok(point)
}

/// Outcome of asking the position source for the viewer's location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PositionFix {
    Resolved(GeoPoint),
    /// User refused or revoked location permission
    Denied,
    /// Platform has no geolocation
    Unsupported,
    TimedOut,
}

impl ViewerState {
    /// Viewer state for a position-source result
    ///
    /// Failed fixes use the application fallback when one is configured,
    /// otherwise the viewer stays unknown and the scene goes procedural.
    pub fn from_fix(fix: PositionFix, fallback: Option<GeoPoint>) -> Self {
        match fix {
            PositionFix::Resolved(point) => ViewerState::at(point),
            PositionFix::Denied | PositionFix::Unsupported | PositionFix::TimedOut => {
                ViewerState { position: fallback }
            }
        }
    }
}
