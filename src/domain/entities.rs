use serde::{Deserialize, Serialize};

/// Currency the supplier invoices in.
pub const SOURCE_CURRENCY: &str = "KRW";
/// Currency costs are reported and resold in.
pub const TARGET_CURRENCY: &str = "TWD";

/// Surcharge applied to the converted value of every item.
pub const HANDLING_FEE_RATE: f64 = 0.03;

/// Identifier for a line item, unique within one batch.
pub type LineItemId = u64;

/// Per-kg and per-shipment rates charged by the forwarder.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateConfig {
    /// Source currency per billed kg.
    #[serde(rename = "intlRateKRW")]
    pub international_rate_per_kg: f64,
    /// Target currency per billed kg, already converted.
    #[serde(rename = "taxDomesticRateTWD")]
    pub duty_and_domestic_rate_per_kg: f64,
    /// Flat source currency fee for the whole shipment.
    #[serde(rename = "boxCostKRW")]
    pub box_cost_fixed: f64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            international_rate_per_kg: 2500.0,
            duty_and_domestic_rate_per_kg: 200.0,
            box_cost_fixed: 3000.0,
        }
    }
}

/// Which rate a mutation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateKind {
    International,
    DutyAndDomestic,
    Box,
}

impl RateKind {
    pub const ALL: [RateKind; 3] = [
        RateKind::International,
        RateKind::DutyAndDomestic,
        RateKind::Box,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RateKind::International => "International freight (KRW/kg)",
            RateKind::DutyAndDomestic => "Duty & domestic (TWD/kg)",
            RateKind::Box => "Box fee (KRW/shipment)",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            RateKind::International | RateKind::Box => "₩",
            RateKind::DutyAndDomestic => "$",
        }
    }
}

impl RateConfig {
    pub fn get(&self, kind: RateKind) -> f64 {
        match kind {
            RateKind::International => self.international_rate_per_kg,
            RateKind::DutyAndDomestic => self.duty_and_domestic_rate_per_kg,
            RateKind::Box => self.box_cost_fixed,
        }
    }

    pub fn set(&mut self, kind: RateKind, value: f64) {
        match kind {
            RateKind::International => self.international_rate_per_kg = value,
            RateKind::DutyAndDomestic => self.duty_and_domestic_rate_per_kg = value,
            RateKind::Box => self.box_cost_fixed = value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "priceKRW", default)]
    pub unit_price_source: f64,
    #[serde(default)]
    pub quantity: f64,
    /// Declared kg per unit.
    #[serde(rename = "weight", default)]
    pub unit_weight: f64,
}

impl LineItem {
    /// A fresh row as created by the "add item" action.
    pub fn blank(id: LineItemId) -> Self {
        Self {
            id,
            name: String::new(),
            unit_price_source: 0.0,
            quantity: 1.0,
            unit_weight: 0.5,
        }
    }

    pub fn source_value(&self) -> f64 {
        self.unit_price_source * self.quantity
    }

    pub fn line_weight(&self) -> f64 {
        self.unit_weight * self.quantity
    }
}

/// Seed rows shown on first launch.
pub fn seed_items() -> Vec<LineItem> {
    vec![
        LineItem {
            id: 1,
            name: "Handmade wool coat".to_string(),
            unit_price_source: 150_000.0,
            quantity: 2.0,
            unit_weight: 1.2,
        },
        LineItem {
            id: 2,
            name: "Basic cotton tee".to_string(),
            unit_price_source: 12_000.0,
            quantity: 10.0,
            unit_weight: 0.2,
        },
        LineItem {
            id: 3,
            name: "Ribbed socks".to_string(),
            unit_price_source: 3_000.0,
            quantity: 20.0,
            unit_weight: 0.05,
        },
    ]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatchSettings {
    /// Target currency per unit of source currency.
    pub exchange_rate: f64,
    pub profit_margin_percent: f64,
    /// Carrier-invoiced kg for the whole shipment.
    pub total_billed_weight: f64,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            exchange_rate: 0.024,
            profit_margin_percent: 30.0,
            total_billed_weight: 10.0,
        }
    }
}

/// A line item together with its derived costs, all in target currency.
#[derive(Clone, Debug, PartialEq)]
pub struct LineResult {
    pub item: LineItem,
    pub base_cost_target: f64,
    pub handling_fee: f64,
    pub unit_freight_share: f64,
    pub unit_duty_share: f64,
    pub unit_box_share: f64,
    pub final_unit_cost: f64,
    pub suggested_price: f64,
    pub batch_total_cost: f64,
}

impl LineResult {
    /// Freight, duty and box shares of one unit combined.
    pub fn unit_shipping_share(&self) -> f64 {
        self.unit_freight_share + self.unit_duty_share + self.unit_box_share
    }
}

/// How freight and duty were spread across the batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AllocationMode {
    #[default]
    Weight,
    Quantity,
}

impl AllocationMode {
    pub fn label(&self) -> &'static str {
        match self {
            AllocationMode::Weight => "By weight",
            AllocationMode::Quantity => "By quantity",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchTotals {
    pub total_source_value: f64,
    pub total_quantity: f64,
    pub total_item_weight: f64,
    pub freight_total: f64,
    pub duty_total: f64,
    pub box_total: f64,
    pub handling_total: f64,
    pub grand_total_cost: f64,
    pub mode: AllocationMode,
}

impl BatchTotals {
    /// Every shared cost on top of the goods themselves.
    pub fn overhead_total(&self) -> f64 {
        self.freight_total + self.duty_total + self.box_total + self.handling_total
    }
}
