//! ZONEWATCH - Sensor-Binding Validation for Alarm Zones
//!
//! Validates the sensor bindings of alarm-zone configurations: each
//! configured detector row carries a primary trigger condition, optional
//! secondary conditions, and an optional alerting action, all referencing
//! objects in a host platform's object tree. The validator resolves each
//! row to its sensor identifier and classifies it as valid, disabled, or
//! invalid for display purposes.
//!
//! Arming/disarming sequencing, delay timers, and notification delivery
//! live in the surrounding runtime and are out of scope here.
//!
//! # Examples
//!
//! ```rust
//! use std::collections::HashSet;
//! use zonewatch::{resolve, Classification, DisplayColor, ZoneConfig};
//!
//! let config = ZoneConfig::from_json(r#"{
//!     "motion_sensors": [{
//!         "enabled": true,
//!         "designation": "hallway",
//!         "primary_condition": [{"variable":[{"variable_id":5}]}]
//!     }]
//! }"#)?;
//!
//! let registry: HashSet<i64> = [5].into_iter().collect();
//! let rows = resolve(&config.motion_sensors, &registry);
//! assert_eq!(rows[0].sensor_id, 5);
//! assert_eq!(rows[0].classification, Classification::Valid);
//! assert_eq!(rows[0].color, DisplayColor::Green);
//! # Ok::<(), zonewatch::ZoneError>(())
//! ```

#![warn(missing_docs)]

// ============================================================================
// CORE MODULES
// ============================================================================

/// Comprehensive error handling with structured error types
pub mod error;

/// Typed model for stored trigger-condition expressions
pub mod condition;

/// Zone configuration structures and stored-property decoding
pub mod config;

/// Object-existence capability over the host object tree
pub mod registry;

/// Sensor-binding validation and row classification
pub mod validator;

/// Serializable row and zone reports for display consumers
pub mod report;

// ============================================================================
// PUBLIC RE-EXPORTS
// ============================================================================

pub use condition::{ActionParameters, AlertingAction, ConditionExpression, RuleGroup, VariableRef};
pub use config::{SensorCategory, SensorEntry, ZoneConfig};
pub use error::{Result, ZoneError};
pub use registry::{ObjectRegistry, StaticRegistry};
pub use report::{category_report, resolve_zone, CategoryReport, RowReport, ZoneReport};
pub use validator::{
    resolve, resolve_with_blacklist, resolved_sensor_ids, Classification, DisplayColor,
    ResolvedRow, RESERVED_ID_MAX,
};

/// ZONEWATCH version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize logging for the zonewatch runtime.
///
/// Installs a `tracing` subscriber honoring `RUST_LOG`, defaulting to
/// `zonewatch=info`. Safe to call more than once; later calls are no-ops.
pub fn init() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("zonewatch=info"));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false));

    // Already-initialized is not an error.
    let _ = subscriber.try_init();

    Ok(())
}
