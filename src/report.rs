// src/report.rs - Serializable row and zone reports for display consumers

use crate::config::{SensorCategory, SensorEntry, ZoneConfig};
use crate::registry::ObjectRegistry;
use crate::validator::{self, Classification, DisplayColor, ResolvedRow};
use serde::Serialize;
use std::collections::HashSet;

/// One display row: the resolved binding joined with its descriptive fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowReport {
    /// Descriptive label of the row
    pub designation: String,
    /// Free-form note
    pub comment: String,
    /// Resolved sensor identifier, `0` when unbound
    pub sensor_id: i64,
    /// Validity classification
    pub classification: Classification,
    /// Display color
    pub color: DisplayColor,
}

/// Report for one sensor category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    /// The category these rows belong to
    pub category: SensorCategory,
    /// One report per configured row, in stored order
    pub rows: Vec<RowReport>,
    /// Number of valid rows
    pub valid: usize,
    /// Number of disabled rows
    pub disabled: usize,
    /// Number of invalid rows
    pub invalid: usize,
}

/// Validation report over a whole alarm zone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneReport {
    /// One report per sensor category, in stored order
    pub categories: Vec<CategoryReport>,
}

impl ZoneReport {
    /// True when any row in any category is invalid
    pub fn has_invalid(&self) -> bool {
        self.categories.iter().any(|c| c.invalid > 0)
    }

    /// Total number of configured rows
    pub fn row_count(&self) -> usize {
        self.categories.iter().map(|c| c.rows.len()).sum()
    }
}

/// Join entries with their resolved rows into a category report
pub fn category_report(
    category: SensorCategory,
    entries: &[SensorEntry],
    rows: &[ResolvedRow],
) -> CategoryReport {
    debug_assert_eq!(entries.len(), rows.len());
    let rows: Vec<RowReport> = entries
        .iter()
        .zip(rows)
        .map(|(entry, row)| RowReport {
            designation: entry.designation.clone(),
            comment: entry.comment.clone(),
            sensor_id: row.sensor_id,
            classification: row.classification,
            color: row.color,
        })
        .collect();

    let count = |c: Classification| rows.iter().filter(|r| r.classification == c).count();
    CategoryReport {
        category,
        valid: count(Classification::Valid),
        disabled: count(Classification::Disabled),
        invalid: count(Classification::Invalid),
        rows,
    }
}

/// Validate every category of a zone configuration.
///
/// The blacklist applies to the door/window category only; the other
/// categories have no blacklist semantics.
pub fn resolve_zone<R>(
    config: &ZoneConfig,
    registry: &R,
    blacklist: &HashSet<i64>,
) -> ZoneReport
where
    R: ObjectRegistry + ?Sized,
{
    let categories = config
        .categories()
        .map(|(category, entries)| {
            let rows = if category == SensorCategory::DoorWindow {
                validator::resolve_with_blacklist(entries, registry, blacklist)
            } else {
                validator::resolve(entries, registry)
            };
            category_report(category, entries, &rows)
        })
        .collect();
    ZoneReport { categories }
}
