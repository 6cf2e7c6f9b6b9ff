// src/condition.rs - Typed model for stored trigger-condition expressions
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A trigger-condition expression decoded from a stored host property.
///
/// The host platform persists conditions as JSON strings: an array of
/// rule groups, each of which may reference sensor variables by object
/// identifier. Decoding is permissive by design; a missing key is "no
/// constraint here", never an error.
///
/// # Examples
///
/// ```rust
/// use zonewatch::ConditionExpression;
///
/// let expr = ConditionExpression::from_property(
///     r#"[{"variable":[{"variable_id":12345}]}]"#,
/// ).unwrap();
/// assert_eq!(expr.primary_sensor_id(), 12345);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionExpression {
    /// Rule groups in stored order
    pub rule_groups: Vec<RuleGroup>,
}

/// One rule group inside a condition expression
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleGroup {
    /// Sensor variable references carried by this group
    #[serde(default, rename = "variable")]
    pub variables: Vec<VariableRef>,
}

/// A reference to a sensor variable in the host object tree
///
/// The identifier is optional: a rule that has not been bound to a
/// variable yet simply carries no id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableRef {
    /// Object identifier of the referenced variable, if bound
    #[serde(default, alias = "variableID")]
    pub variable_id: Option<i64>,
}

impl ConditionExpression {
    /// Decode a condition from a stored property string.
    ///
    /// Returns `None` for empty and malformed strings. Malformation is
    /// logged and otherwise treated like an absent condition.
    pub fn from_property(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str::<Vec<RuleGroup>>(raw) {
            Ok(rule_groups) => Some(Self { rule_groups }),
            Err(e) => {
                warn!("discarding malformed condition property: {}", e);
                None
            }
        }
    }

    /// Decode a list of secondary conditions from a stored property string.
    ///
    /// Accepts either an array of expressions (array of rule-group
    /// arrays) or a flat array of rule groups, in which case each group
    /// becomes its own expression. Empty and malformed strings decode
    /// to an empty list.
    pub fn list_from_property(raw: &str) -> Vec<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Vec::new();
        }
        if let Ok(list) = serde_json::from_str::<Vec<ConditionExpression>>(raw) {
            return list;
        }
        match serde_json::from_str::<Vec<RuleGroup>>(raw) {
            Ok(groups) => groups
                .into_iter()
                .map(|g| Self { rule_groups: vec![g] })
                .collect(),
            Err(e) => {
                warn!("discarding malformed condition list property: {}", e);
                Vec::new()
            }
        }
    }

    /// True when the expression carries no rule groups at all
    pub fn is_empty(&self) -> bool {
        self.rule_groups.is_empty()
    }

    /// Extract the primary sensor identifier.
    ///
    /// Only the first variable of the first rule group is consulted;
    /// deeper rules never contribute to the primary binding. Returns
    /// `0` when no bound variable is present at that position.
    pub fn primary_sensor_id(&self) -> i64 {
        self.rule_groups
            .first()
            .and_then(|group| group.variables.first())
            .and_then(|var| var.variable_id)
            .unwrap_or(0)
    }

    /// Iterate over every bound variable identifier in every rule group
    pub fn variable_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.rule_groups
            .iter()
            .flat_map(|group| group.variables.iter())
            .filter_map(|var| var.variable_id)
    }
}

/// An alerting action attached to a sensor row
///
/// When the row triggers, the host invokes the object named by
/// `parameters.target`. The target is an arbitrary object, not
/// necessarily a sensor variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertingAction {
    /// Action invocation parameters
    #[serde(default)]
    pub parameters: ActionParameters,
}

/// Parameters of an alerting action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionParameters {
    /// Object identifier to invoke, if configured
    #[serde(default, alias = "TARGET")]
    pub target: Option<i64>,
}

impl AlertingAction {
    /// Decode an alerting action from a stored property string.
    ///
    /// Returns `None` for empty and malformed strings.
    pub fn from_property(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str::<AlertingAction>(raw) {
            Ok(action) => Some(action),
            Err(e) => {
                warn!("discarding malformed alerting-action property: {}", e);
                None
            }
        }
    }
}
