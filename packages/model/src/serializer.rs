//! Design ⇄ JSON.
//!
//! Saving writes camelCase JSON with every style default spelled out;
//! loading accepts partial input and fills defaults in. A structurally
//! invalid document is rejected as a whole.

use crate::design::Design;
use crate::error::{DesignError, DesignResult};

/// Pretty-printed JSON, as written by save and export
pub fn serialize(design: &Design) -> DesignResult<String> {
    Ok(serde_json::to_string_pretty(design)?)
}

/// Single-line JSON
pub fn serialize_compact(design: &Design) -> DesignResult<String> {
    Ok(serde_json::to_string(design)?)
}

pub fn deserialize(source: &str) -> DesignResult<Design> {
    let design: Design = serde_json::from_str(source)?;
    Ok(design)
}

/// Deserialize from an already-parsed JSON value
pub fn from_value(value: serde_json::Value) -> DesignResult<Design> {
    serde_json::from_value(value).map_err(DesignError::Malformed)
}
