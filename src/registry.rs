// src/registry.rs - Object-existence capability over the host object tree

use crate::error::Result;
use std::collections::HashSet;
use std::path::Path;

/// Existence query against the host platform's object tree.
///
/// Implementations must tolerate arbitrary identifiers, including zero
/// and negative values, answering `false` rather than failing. A backend
/// whose lookup errors is expected to normalize the failure to `false`
/// before it reaches the validator.
pub trait ObjectRegistry {
    /// True when an object with this identifier exists
    fn exists(&self, id: i64) -> bool;
}

impl<F> ObjectRegistry for F
where
    F: Fn(i64) -> bool,
{
    fn exists(&self, id: i64) -> bool {
        self(id)
    }
}

impl ObjectRegistry for HashSet<i64> {
    fn exists(&self, id: i64) -> bool {
        self.contains(&id)
    }
}

/// Snapshot registry backed by a set of known object identifiers
///
/// Used by the CLI, which works against an exported id list instead of
/// a live object tree.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    ids: HashSet<i64>,
}

impl StaticRegistry {
    /// Build a registry from an id collection
    pub fn new<I: IntoIterator<Item = i64>>(ids: I) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Load a registry from a JSON file containing an array of ids
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let ids: Vec<i64> = serde_json::from_str(&raw)?;
        Ok(Self::new(ids))
    }

    /// Number of known objects
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when no objects are known
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl ObjectRegistry for StaticRegistry {
    fn exists(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }
}
