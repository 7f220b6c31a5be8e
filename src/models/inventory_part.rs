//! Inventory part record.

use super::Record;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A spare part kept in the depot inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct InventoryPart {
    pub id: String,

    /// Cleaned part number, uppercase alphanumerics
    pub part_number: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Units on hand
    pub quantity: u32,

    pub unit_price: Decimal,

    /// Reorder threshold
    pub min_stock_level: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl InventoryPart {
    /// At or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock_level
    }

    /// Value of the units on hand.
    pub fn stock_value(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

impl Record for InventoryPart {
    const COLLECTION: &'static str = "inventory_parts";

    fn id(&self) -> &str {
        &self.id
    }
}
