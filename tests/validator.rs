use std::collections::HashSet;
use zonewatch::*;

fn registry(ids: &[i64]) -> HashSet<i64> {
    ids.iter().copied().collect()
}

#[test]
fn test_resolve_example_rows() {
    // Two rows bound to existing sensors, one armed and one switched off.
    let json = r#"{
        "door_window_sensors": [
            {
                "enabled": true,
                "designation": "front door",
                "primary_condition": [{"variable":[{"variable_id":5}]}]
            },
            {
                "enabled": false,
                "designation": "terrace door",
                "primary_condition": [{"variable":[{"variable_id":6}]}]
            }
        ]
    }"#;
    let config = ZoneConfig::from_json(json).unwrap();
    let rows = resolve(&config.door_window_sensors, &registry(&[5, 6]));

    assert_eq!(
        rows,
        vec![
            ResolvedRow {
                sensor_id: 5,
                classification: Classification::Valid,
                color: DisplayColor::Green,
            },
            ResolvedRow {
                sensor_id: 6,
                classification: Classification::Disabled,
                color: DisplayColor::Grey,
            },
        ]
    );
}

#[test]
fn test_full_pipeline_with_embedded_property_strings() {
    // The host stores the row list and its condition fields as JSON strings.
    let row = serde_json::json!({
        "enabled": true,
        "designation": "hallway",
        "primary_condition": "[{\"variable\":[{\"variable_id\":12345}]}]",
        "secondary_conditions": "[{\"variable\":[{\"variable_id\":200}]}]",
        "alerting_action_enabled": true,
        "alerting_action": "{\"parameters\":{\"target\":300}}"
    });
    let document = serde_json::json!({
        "motion_sensors": serde_json::to_string(&vec![row]).unwrap()
    });
    let config = ZoneConfig::from_json(&document.to_string()).unwrap();
    assert_eq!(config.motion_sensors.len(), 1);

    let ok = resolve(&config.motion_sensors, &registry(&[12345, 200, 300]));
    assert_eq!(ok[0].sensor_id, 12345);
    assert_eq!(ok[0].classification, Classification::Valid);

    // Dropping the action target from the registry flips the row to red.
    let broken = resolve(&config.motion_sensors, &registry(&[12345, 200]));
    assert_eq!(broken[0].classification, Classification::Invalid);
    assert_eq!(broken[0].color, DisplayColor::Red);
}

#[test]
fn test_host_format_keys_resolve_and_validate() {
    // Properties exported from the host platform use `variableID` and
    // `TARGET` as key names; they must bind and validate like our own.
    let json = r#"{
        "door_window_sensors": [{
            "enabled": true,
            "designation": "front door",
            "primary_condition": [{"variable":[{"variableID":5}]}],
            "alerting_action_enabled": true,
            "alerting_action": {"parameters":{"TARGET":999}}
        }]
    }"#;
    let config = ZoneConfig::from_json(json).unwrap();

    let rows = resolve(&config.door_window_sensors, &registry(&[5, 999]));
    assert_eq!(rows[0].sensor_id, 5);
    assert_eq!(rows[0].classification, Classification::Valid);

    // A dangling TARGET must flip the row to invalid.
    let rows = resolve(&config.door_window_sensors, &registry(&[5]));
    assert_eq!(rows[0].classification, Classification::Invalid);
}

#[test]
fn test_reserved_identifiers_never_validate() {
    let json = r#"{
        "water_sensors": [
            {"enabled": true, "primary_condition": [{"variable":[{"variable_id":1}]}]},
            {"enabled": true, "primary_condition": [{"variable":[{"variable_id":0}]}]}
        ]
    }"#;
    let config = ZoneConfig::from_json(json).unwrap();
    // Even a registry claiming the reserved ids exist cannot validate them.
    let rows = resolve(&config.water_sensors, &registry(&[0, 1]));
    assert!(rows
        .iter()
        .all(|r| r.classification == Classification::Invalid));
}

#[test]
fn test_blank_rows_validate_by_enabled_flag() {
    let entries = vec![
        SensorEntry {
            enabled: true,
            ..SensorEntry::default()
        },
        SensorEntry::default(),
    ];
    let rows = resolve(&entries, &registry(&[]));
    assert_eq!(rows[0].sensor_id, 0);
    assert_eq!(rows[0].classification, Classification::Valid);
    assert_eq!(rows[1].classification, Classification::Disabled);
}

#[test]
fn test_zone_report_end_to_end() {
    let json = r#"{
        "door_window_sensors": [
            {"enabled": true, "designation": "door", "primary_condition": [{"variable":[{"variable_id":10}]}]},
            {"enabled": true, "designation": "window", "primary_condition": [{"variable":[{"variable_id":11}]}]}
        ],
        "smoke_sensors": [
            {"enabled": true, "designation": "kitchen", "primary_condition": [{"variable":[{"variable_id":12}]}]}
        ]
    }"#;
    let config = ZoneConfig::from_json(json).unwrap();
    let blacklist: HashSet<i64> = [11].into_iter().collect();
    let report = resolve_zone(&config, &registry(&[10, 11, 12]), &blacklist);

    assert!(!report.has_invalid());
    assert_eq!(report.row_count(), 3);

    let door_window = &report.categories[0];
    assert_eq!(door_window.category, SensorCategory::DoorWindow);
    assert_eq!(door_window.valid, 1);
    assert_eq!(door_window.disabled, 1);
    assert_eq!(door_window.rows[1].classification, Classification::Disabled);

    let smoke = report
        .categories
        .iter()
        .find(|c| c.category == SensorCategory::Smoke)
        .unwrap();
    assert_eq!(smoke.valid, 1);
}

#[test]
fn test_idempotent_resolution() {
    let json = r#"{
        "glass_breakage_sensors": [
            {"enabled": true, "primary_condition": [{"variable":[{"variable_id":21}]}]},
            {"enabled": false, "primary_condition": [{"variable":[{"variable_id":22}]}]},
            {"enabled": true, "primary_condition": [{"variable":[{"variable_id":99}]}]}
        ]
    }"#;
    let config = ZoneConfig::from_json(json).unwrap();
    let reg = registry(&[21, 22]);
    let first = resolve(&config.glass_breakage_sensors, &reg);
    let second = resolve(&config.glass_breakage_sensors, &reg);
    assert_eq!(first, second);
}

#[test]
fn test_sensor_id_pick_list() {
    let entries = vec![
        SensorEntry {
            enabled: true,
            primary_condition: Some(ConditionExpression {
                rule_groups: vec![RuleGroup {
                    variables: vec![VariableRef {
                        variable_id: Some(31),
                    }],
                }],
            }),
            ..SensorEntry::default()
        },
        SensorEntry::default(),
    ];
    let rows = resolve(&entries, &registry(&[31]));
    assert_eq!(resolved_sensor_ids(&rows), vec![31]);
}
