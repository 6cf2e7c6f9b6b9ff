// src/config.rs - Zone configuration structures and stored-property decoding

use crate::condition::{AlertingAction, ConditionExpression};
use crate::error::Result;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use tracing::warn;

// ============================================================================
// SENSOR ENTRY
// ============================================================================

/// One configured sensor row of an alarm zone
///
/// Category-specific alarm-mode flags (full/hull/partial protection and
/// the like) ride along in `extra`; validation never interprets them and
/// they survive re-serialization untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorEntry {
    /// Whether the row participates in alarm logic
    pub enabled: bool,

    /// Descriptive label, not validated
    pub designation: String,

    /// Free-form note, not validated
    pub comment: String,

    /// The rule identifying which sensor variable triggers this row
    #[serde(deserialize_with = "de_condition")]
    pub primary_condition: Option<ConditionExpression>,

    /// Additional rules further constraining triggering
    #[serde(deserialize_with = "de_condition_list")]
    pub secondary_conditions: Vec<ConditionExpression>,

    /// Whether the alerting action is armed for this row
    pub alerting_action_enabled: bool,

    /// Optional action invoked when the row triggers
    #[serde(deserialize_with = "de_action")]
    pub alerting_action: Option<AlertingAction>,

    /// Pass-through payload of category-specific flags
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ============================================================================
// SENSOR CATEGORIES
// ============================================================================

/// The five sensor categories of an alarm zone
///
/// All categories share the [`SensorEntry`] shape; they differ only in
/// which downstream alarm-mode flags accompany each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorCategory {
    /// Door and window contacts
    DoorWindow,
    /// Motion detectors
    Motion,
    /// Glass-breakage detectors
    GlassBreakage,
    /// Smoke detectors
    Smoke,
    /// Water / leakage detectors
    Water,
}

impl SensorCategory {
    /// All categories in stored order
    pub const ALL: [SensorCategory; 5] = [
        SensorCategory::DoorWindow,
        SensorCategory::Motion,
        SensorCategory::GlassBreakage,
        SensorCategory::Smoke,
        SensorCategory::Water,
    ];
}

impl fmt::Display for SensorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SensorCategory::DoorWindow => "door/window",
            SensorCategory::Motion => "motion",
            SensorCategory::GlassBreakage => "glass-breakage",
            SensorCategory::Smoke => "smoke",
            SensorCategory::Water => "water",
        };
        f.write_str(name)
    }
}

// ============================================================================
// ZONE CONFIGURATION
// ============================================================================

/// Alarm-zone configuration: one sensor list per category
///
/// The host platform stores each list as a JSON property, sometimes as a
/// JSON string containing the array. Both shapes decode identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Door and window contact rows
    #[serde(deserialize_with = "de_entry_list")]
    pub door_window_sensors: Vec<SensorEntry>,

    /// Motion detector rows
    #[serde(deserialize_with = "de_entry_list")]
    pub motion_sensors: Vec<SensorEntry>,

    /// Glass-breakage detector rows
    #[serde(deserialize_with = "de_entry_list")]
    pub glass_breakage_sensors: Vec<SensorEntry>,

    /// Smoke detector rows
    #[serde(deserialize_with = "de_entry_list")]
    pub smoke_sensors: Vec<SensorEntry>,

    /// Water detector rows
    #[serde(deserialize_with = "de_entry_list")]
    pub water_sensors: Vec<SensorEntry>,
}

impl ZoneConfig {
    /// Load a zone configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Decode a zone configuration from a JSON document
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Sensor rows of one category
    pub fn entries(&self, category: SensorCategory) -> &[SensorEntry] {
        match category {
            SensorCategory::DoorWindow => &self.door_window_sensors,
            SensorCategory::Motion => &self.motion_sensors,
            SensorCategory::GlassBreakage => &self.glass_breakage_sensors,
            SensorCategory::Smoke => &self.smoke_sensors,
            SensorCategory::Water => &self.water_sensors,
        }
    }

    /// Iterate over all categories with their rows, in stored order
    pub fn categories(&self) -> impl Iterator<Item = (SensorCategory, &[SensorEntry])> {
        SensorCategory::ALL
            .into_iter()
            .map(move |category| (category, self.entries(category)))
    }
}

// ============================================================================
// STORED-PROPERTY DECODERS
// ============================================================================
// Conditions and actions may arrive structured or as embedded JSON strings;
// malformed condition payloads decode to "no constraint" rather than erroring.

fn de_condition<'de, D>(deserializer: D) -> std::result::Result<Option<ConditionExpression>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => ConditionExpression::from_property(&s),
        other => match serde_json::from_value(other) {
            Ok(expr) => Some(expr),
            Err(e) => {
                warn!("discarding malformed condition payload: {}", e);
                None
            }
        },
    })
}

fn de_condition_list<'de, D>(deserializer: D) -> std::result::Result<Vec<ConditionExpression>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Null => Vec::new(),
        serde_json::Value::String(s) => ConditionExpression::list_from_property(&s),
        other => serde_json::to_string(&other)
            .ok()
            .map(|s| ConditionExpression::list_from_property(&s))
            .unwrap_or_default(),
    })
}

fn de_action<'de, D>(deserializer: D) -> std::result::Result<Option<AlertingAction>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => AlertingAction::from_property(&s),
        other => match serde_json::from_value(other) {
            Ok(action) => Some(action),
            Err(e) => {
                warn!("discarding malformed alerting-action payload: {}", e);
                None
            }
        },
    })
}

fn de_entry_list<'de, D>(deserializer: D) -> std::result::Result<Vec<SensorEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    match raw {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(Vec::new())
            } else {
                serde_json::from_str(s).map_err(D::Error::custom)
            }
        }
        other => serde_json::from_value(other).map_err(D::Error::custom),
    }
}
