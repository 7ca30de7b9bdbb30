//! Row shapes of the remote `equipment` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fotogear_core::Equipment;

/// One row as the REST service reads and writes it (snake_case columns).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub is_packed: bool,
    #[serde(default)]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl EquipmentRow {
    pub fn from_equipment(item: &Equipment, owner: &str) -> Self {
        EquipmentRow {
            id: item.id.clone(),
            user_id: owner.to_string(),
            name: item.name.clone(),
            description: item.description.clone(),
            image_url: item.image_url.clone(),
            is_packed: item.is_packed,
            category: item.category.clone(),
            created_at: item.created_at,
        }
    }
}

impl From<EquipmentRow> for Equipment {
    fn from(row: EquipmentRow) -> Self {
        Equipment {
            id: row.id,
            name: row.name,
            description: row.description,
            image_url: row.image_url,
            is_packed: row.is_packed,
            category: row.category,
            created_at: row.created_at,
        }
    }
}

/// Body of the packed-flag update.
#[derive(Debug, Serialize)]
pub struct PackedPatch {
    pub is_packed: bool,
}
