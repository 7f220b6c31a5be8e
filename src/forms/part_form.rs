use super::{optional_text, FieldChecker};
use crate::domain::{Money, PartNumber};
use crate::error::FormResult;
use crate::formatter::FieldKind;
use crate::metrics::Metrics;
use crate::models::InventoryPart;
use schemars::JsonSchema;
use serde::Deserialize;

/// Raw input for adding a part to inventory.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PartForm {
    /// Part number as typed; separators are dropped
    pub part_number: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    /// Unit price as typed, e.g. "1,250.00"
    pub unit_price: String,
    #[serde(default)]
    pub min_stock_level: Option<i64>,
    #[serde(default)]
    pub supplier: Option<String>,
}

impl PartForm {
    pub fn into_record(self, metrics: &Metrics) -> FormResult<InventoryPart> {
        let mut checker = FieldChecker::new(metrics);

        let part_number = checker.value(
            "part_number",
            "Part number",
            &self.part_number,
            FieldKind::PartNumber,
            "Part number must contain letters or digits",
            |v| PartNumber::new(v),
        );
        let name = checker.required("name", "Part name", &self.name);
        let quantity = checker.count("quantity", "Quantity", self.quantity);
        let min_stock_level =
            checker.count("min_stock_level", "Minimum stock level", self.min_stock_level);

        let unit_price = checker.value(
            "unit_price",
            "Unit price",
            &self.unit_price,
            FieldKind::CurrencyAmount,
            "Enter a price such as 450.50",
            Money::parse,
        );

        checker.finish(InventoryPart {
            part_number: part_number.map(|p| p.to_string()).unwrap_or_default(),
            name,
            category: optional_text(self.category),
            quantity,
            unit_price: unit_price.unwrap_or_default().amount(),
            min_stock_level,
            supplier: optional_text(self.supplier),
            ..Default::default()
        })
    }
}
