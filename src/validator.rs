// src/validator.rs - Sensor-binding validation and row classification

use crate::config::SensorEntry;
use crate::registry::ObjectRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{trace, warn};

/// Identifiers at or below this value are reserved by the host object
/// tree ("none" and root) and can never name a sensor variable.
pub const RESERVED_ID_MAX: i64 = 1;

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Validity classification of one sensor row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// All referenced objects exist and the row is armed
    Valid,
    /// References are intact but the row is switched off or blacklisted
    Disabled,
    /// At least one referenced object is reserved or missing
    Invalid,
}

/// Display color of one sensor row, mapped 1:1 from its classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayColor {
    /// Valid row
    Green,
    /// Disabled row
    Grey,
    /// Invalid row
    Red,
}

impl Classification {
    /// The display color for this classification
    pub fn color(self) -> DisplayColor {
        match self {
            Classification::Valid => DisplayColor::Green,
            Classification::Disabled => DisplayColor::Grey,
            Classification::Invalid => DisplayColor::Red,
        }
    }
}

/// Resolution result for one sensor row, emitted in input order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedRow {
    /// Sensor identifier extracted from the primary condition, `0` if none
    pub sensor_id: i64,
    /// Validity classification
    pub classification: Classification,
    /// Display color, informational only
    pub color: DisplayColor,
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Resolve and classify every sensor row against the object registry.
///
/// Produces exactly one [`ResolvedRow`] per entry, in input order. The
/// function is total: malformed or absent condition fields contribute no
/// constraint, never an error.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashSet;
/// use zonewatch::{resolve, Classification, SensorEntry};
///
/// let entries = vec![SensorEntry::default()];
/// let registry: HashSet<i64> = HashSet::new();
/// let rows = resolve(&entries, &registry);
/// assert_eq!(rows[0].sensor_id, 0);
/// assert_eq!(rows[0].classification, Classification::Disabled);
/// ```
pub fn resolve<R>(entries: &[SensorEntry], registry: &R) -> Vec<ResolvedRow>
where
    R: ObjectRegistry + ?Sized,
{
    entries
        .iter()
        .map(|entry| resolve_entry(entry, registry, None))
        .collect()
}

/// Resolve rows with a sensor blacklist applied (door/window variant).
///
/// A row whose resolved sensor id appears in the blacklist is classified
/// `Disabled` regardless of its enabled flag. Invalid references still
/// win over the blacklist.
pub fn resolve_with_blacklist<R>(
    entries: &[SensorEntry],
    registry: &R,
    blacklist: &HashSet<i64>,
) -> Vec<ResolvedRow>
where
    R: ObjectRegistry + ?Sized,
{
    entries
        .iter()
        .map(|entry| resolve_entry(entry, registry, Some(blacklist)))
        .collect()
}

/// Non-zero sensor ids of resolved rows, in row order.
///
/// Feeds the renderer's pick-lists, e.g. the "assign variable profile"
/// bulk operation.
pub fn resolved_sensor_ids(rows: &[ResolvedRow]) -> Vec<i64> {
    rows.iter()
        .map(|row| row.sensor_id)
        .filter(|&id| id != 0)
        .collect()
}

fn resolve_entry<R>(
    entry: &SensorEntry,
    registry: &R,
    blacklist: Option<&HashSet<i64>>,
) -> ResolvedRow
where
    R: ObjectRegistry + ?Sized,
{
    let mut sensor_id = 0i64;
    let mut invalid = false;

    // Primary condition: only the first variable of the first rule group
    // names the sensor. An empty expression is the same as no expression.
    if let Some(primary) = entry
        .primary_condition
        .as_ref()
        .filter(|expr| !expr.is_empty())
    {
        sensor_id = primary.primary_sensor_id();
        if sensor_id <= RESERVED_ID_MAX || !registry.exists(sensor_id) {
            warn!(
                "row '{}': primary sensor {} is reserved or missing",
                entry.designation, sensor_id
            );
            invalid = true;
        }
    }

    // Secondary conditions: every bound variable must exist.
    for expr in &entry.secondary_conditions {
        for id in expr.variable_ids() {
            if id <= RESERVED_ID_MAX || !registry.exists(id) {
                warn!(
                    "row '{}': secondary condition references reserved or missing object {}",
                    entry.designation, id
                );
                invalid = true;
            }
        }
    }

    // Alerting-action target: an arbitrary object, so no reserved-id lower
    // bound applies here, only existence.
    if entry.alerting_action_enabled {
        if let Some(target) = entry
            .alerting_action
            .as_ref()
            .and_then(|action| action.parameters.target)
        {
            if !registry.exists(target) {
                warn!(
                    "row '{}': alerting-action target {} is missing",
                    entry.designation, target
                );
                invalid = true;
            }
        }
    }

    let blacklisted = blacklist.is_some_and(|list| list.contains(&sensor_id));

    // Invalid wins over disabled and blacklisted.
    let classification = if invalid {
        Classification::Invalid
    } else if !entry.enabled || blacklisted {
        Classification::Disabled
    } else {
        Classification::Valid
    };

    trace!(
        "row '{}' resolved: sensor {} -> {:?}",
        entry.designation,
        sensor_id,
        classification
    );

    ResolvedRow {
        sensor_id,
        classification,
        color: classification.color(),
    }
}
