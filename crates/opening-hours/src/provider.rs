//! Venue selection and schedule stores.
//!
//! A [`ScheduleProvider`] hands out the weekly table for the mall as a whole
//! or for one shop. Missing data is an empty table, never an error: the
//! resolver turns an empty table into `closed`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, ScheduleError};
use crate::schedule::WeeklySchedule;

/// Which venue a schedule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    /// The shopping center itself.
    Mall,
    /// One shop, by its content-store identifier.
    Shop(u64),
}

impl Venue {
    /// The shop when an id is given, otherwise the mall.
    pub fn from_shop_id(shop_id: Option<u64>) -> Self {
        shop_id.map_or(Venue::Mall, Venue::Shop)
    }
}

/// Source of weekly tables.
pub trait ScheduleProvider {
    /// The table for `venue`, or an empty one when the store has none.
    fn schedule(&self, venue: &Venue) -> WeeklySchedule;
}

/// An in-memory store loaded from a JSON document:
///
/// ```json
/// { "mall": { "monday": { ... } }, "shops": { "42": { "monday": { ... } } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonScheduleStore {
    mall: WeeklySchedule,
    shops: BTreeMap<u64, WeeklySchedule>,
}

impl JsonScheduleStore {
    pub fn new(mall: WeeklySchedule) -> Self {
        Self {
            mall,
            shops: BTreeMap::new(),
        }
    }

    pub fn with_shop(mut self, id: u64, schedule: WeeklySchedule) -> Self {
        self.shops.insert(id, schedule);
        self
    }

    /// Read and parse a store document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Io`] if the file cannot be read, or
    /// [`ScheduleError::InvalidSchedule`] if it is not a store document.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ScheduleError::Io(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), bytes = text.len(), "loaded schedule store");
        Self::from_json_str(&text)
    }

    /// Parse a store document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidSchedule`] if the text is not JSON or
    /// does not have the store shape.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| ScheduleError::InvalidSchedule(format!("not valid JSON: {e}")))?;
        Self::from_json_value(&value)
    }

    /// Build from a parsed store document.
    ///
    /// Both `mall` and `shops` are optional. Shop keys that are not numeric
    /// identifiers are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidSchedule`] if the document, `shops`, or
    /// any individual table has the wrong shape.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let Value::Object(root) = value else {
            return Err(ScheduleError::InvalidSchedule(
                "store document must be an object".to_string(),
            ));
        };

        let mall = match root.get("mall") {
            Some(v) => WeeklySchedule::from_json_value(v).map_err(|e| within("mall", e))?,
            None => WeeklySchedule::default(),
        };

        let mut shops = BTreeMap::new();
        match root.get("shops") {
            None | Some(Value::Null) => {}
            Some(Value::Object(entries)) => {
                for (key, v) in entries {
                    let Ok(id) = key.trim().parse::<u64>() else {
                        warn!(key = %key, "ignoring shop with non-numeric id");
                        continue;
                    };
                    let schedule = WeeklySchedule::from_json_value(v)
                        .map_err(|e| within(&format!("shop {id}"), e))?;
                    shops.insert(id, schedule);
                }
            }
            Some(_) => {
                return Err(ScheduleError::InvalidSchedule(
                    "'shops' must be an object keyed by shop id".to_string(),
                ));
            }
        }

        Ok(Self { mall, shops })
    }
}

impl ScheduleProvider for JsonScheduleStore {
    fn schedule(&self, venue: &Venue) -> WeeklySchedule {
        match venue {
            Venue::Mall => self.mall.clone(),
            Venue::Shop(id) => self.shops.get(id).cloned().unwrap_or_else(|| {
                debug!(shop = id, "no schedule for shop");
                WeeklySchedule::default()
            }),
        }
    }
}

/// Prefix a table error with where in the document it occurred.
fn within(section: &str, err: ScheduleError) -> ScheduleError {
    match err {
        ScheduleError::InvalidSchedule(msg) => {
            ScheduleError::InvalidSchedule(format!("{section}: {msg}"))
        }
        other => other,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
