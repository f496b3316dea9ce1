//! Landed cost allocation.
//!
//! Shared shipment costs are spread over the batch once per recompute. Freight and
//! duty follow each line's share of the declared weight, falling back to its share of
//! the unit count when nothing in the batch declares a weight. The box fee always
//! follows the unit count. No rounding happens here.

use super::entities::{
    AllocationMode, BatchSettings, BatchTotals, LineItem, LineResult, RateConfig,
    HANDLING_FEE_RATE,
};

/// Declared and billed weight may drift by this much before it is worth flagging.
pub const WEIGHT_GAP_TOLERANCE_KG: f64 = 0.5;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Allocation {
    pub results: Vec<LineResult>,
    pub totals: BatchTotals,
}

/// Derive per-line and batch costs. Total over every numeric input, including zero
/// and negative values.
pub fn compute(
    items: &[LineItem],
    rates: &RateConfig,
    total_billed_weight: f64,
    exchange_rate: f64,
    profit_margin_percent: f64,
) -> Allocation {
    let total_source_value: f64 = items.iter().map(LineItem::source_value).sum();
    let total_quantity: f64 = items.iter().map(|item| item.quantity).sum();
    let total_item_weight: f64 = items.iter().map(LineItem::line_weight).sum();

    let freight_total = rates.international_rate_per_kg * total_billed_weight * exchange_rate;
    let duty_total = rates.duty_and_domestic_rate_per_kg * total_billed_weight;
    let box_total = rates.box_cost_fixed * exchange_rate;
    let handling_total = total_source_value * exchange_rate * HANDLING_FEE_RATE;

    let mode = if total_item_weight > 0.0 {
        AllocationMode::Weight
    } else {
        AllocationMode::Quantity
    };

    let markup = 1.0 + profit_margin_percent / 100.0;

    let results: Vec<LineResult> = items
        .iter()
        .map(|item| {
            let quantity_share = ratio(item.quantity, total_quantity);
            let weight_share = match mode {
                AllocationMode::Weight => item.line_weight() / total_item_weight,
                AllocationMode::Quantity => quantity_share,
            };

            let unit_freight_share = per_unit(freight_total * weight_share, item.quantity);
            let unit_duty_share = per_unit(duty_total * weight_share, item.quantity);
            let unit_box_share = per_unit(box_total * quantity_share, item.quantity);

            let base_cost_target = item.unit_price_source * exchange_rate;
            let handling_fee = base_cost_target * HANDLING_FEE_RATE;
            let final_unit_cost = base_cost_target
                + handling_fee
                + unit_freight_share
                + unit_duty_share
                + unit_box_share;

            LineResult {
                item: item.clone(),
                base_cost_target,
                handling_fee,
                unit_freight_share,
                unit_duty_share,
                unit_box_share,
                final_unit_cost,
                suggested_price: final_unit_cost * markup,
                batch_total_cost: final_unit_cost * item.quantity,
            }
        })
        .collect();

    let grand_total_cost = results.iter().map(|line| line.batch_total_cost).sum();

    Allocation {
        results,
        totals: BatchTotals {
            total_source_value,
            total_quantity,
            total_item_weight,
            freight_total,
            duty_total,
            box_total,
            handling_total,
            grand_total_cost,
            mode,
        },
    }
}

/// Same as [`compute`], reading the batch-level inputs from one settings value.
pub fn compute_batch(items: &[LineItem], rates: &RateConfig, settings: &BatchSettings) -> Allocation {
    compute(
        items,
        rates,
        settings.total_billed_weight,
        settings.exchange_rate,
        settings.profit_margin_percent,
    )
}

/// Difference between declared and billed weight when it exceeds
/// [`WEIGHT_GAP_TOLERANCE_KG`].
pub fn weight_gap(totals: &BatchTotals, total_billed_weight: f64) -> Option<f64> {
    let gap = (totals.total_item_weight - total_billed_weight).abs();
    (gap > WEIGHT_GAP_TOLERANCE_KG).then_some(gap)
}

fn ratio(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole
    } else {
        0.0
    }
}

fn per_unit(line_amount: f64, quantity: f64) -> f64 {
    if quantity == 0.0 {
        0.0
    } else {
        line_amount / quantity
    }
}
