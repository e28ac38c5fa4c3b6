use super::DependencyGraph;
use crate::error::SerializationError;

impl DependencyGraph {
    /// Pretty-printed JSON with files ordered by path.
    pub fn to_json(&self) -> Result<String, SerializationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SerializationError> {
        Ok(serde_json::from_str(json)?)
    }
}
