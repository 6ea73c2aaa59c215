//! Stored item representation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open-ended field map of an item, excluding its identifier.
pub type Fields = serde_json::Map<String, Value>;

/// Field name carrying the identifier on the wire.
pub const ID_FIELD: &str = "id";

/// A stored resource: store-assigned identifier plus arbitrary fields.
///
/// Serializes as one flat JSON object, `{"id": "1", "name": "x", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Item {
    /// Build an item, discarding any `id` member the caller put in `fields`.
    pub fn new(id: impl Into<String>, mut fields: Fields) -> Self {
        fields.remove(ID_FIELD);
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
