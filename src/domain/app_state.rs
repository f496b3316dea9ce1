use std::collections::HashSet;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::allocation::{compute_batch, Allocation};
use super::entities::{seed_items, BatchSettings, LineItem, LineItemId, RateConfig, RateKind};

/// One field-level change to a line item. Numeric variants carry the raw form text.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemEdit {
    Name(String),
    Price(String),
    Quantity(String),
    Weight(String),
}

/// Canonical inputs for the calculator. Everything shown as a cost is derived from
/// here through [`AppState::allocation`].
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub items: Vec<LineItem>,
    pub rates: RateConfig,
    pub settings: BatchSettings,
    /// Set once the initial load attempt has finished, whatever its outcome.
    hydrated: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            items: seed_items(),
            rates: RateConfig::default(),
            settings: BatchSettings::default(),
            hydrated: false,
        }
    }
}

impl AppState {
    pub fn allocation(&self) -> Allocation {
        compute_batch(&self.items, &self.rates, &self.settings)
    }

    pub fn next_item_id(&self) -> LineItemId {
        self.items.iter().map(|item| item.id).max().map_or(1, |max| max + 1)
    }

    pub fn add_item(&mut self) -> LineItemId {
        let id = self.next_item_id();
        self.items.push(LineItem::blank(id));
        id
    }

    pub fn remove_item(&mut self, id: LineItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn clear_items(&mut self) {
        self.items.clear();
    }

    /// Returns false when no item has the given id.
    pub fn apply_edit(&mut self, id: LineItemId, edit: ItemEdit) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        match edit {
            ItemEdit::Name(name) => item.name = name,
            ItemEdit::Price(raw) => item.unit_price_source = parse_number(&raw),
            ItemEdit::Quantity(raw) => item.quantity = parse_number(&raw),
            ItemEdit::Weight(raw) => item.unit_weight = parse_number(&raw),
        }
        true
    }

    pub fn set_rate(&mut self, kind: RateKind, raw: &str) {
        self.rates.set(kind, parse_number(raw));
    }

    pub fn set_exchange_rate(&mut self, raw: &str) {
        self.settings.exchange_rate = parse_number(raw);
    }

    pub fn set_profit_margin(&mut self, raw: &str) {
        self.settings.profit_margin_percent = parse_number(raw);
    }

    pub fn set_total_billed_weight(&mut self, raw: &str) {
        self.settings.total_billed_weight = parse_number(raw);
    }

    /// Restore built-in rates, settings and seed rows.
    pub fn reset_defaults(&mut self) {
        let hydrated = self.hydrated;
        *self = Self {
            hydrated,
            ..Self::default()
        };
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Record that loading is over even though nothing was applied.
    pub fn mark_hydrated(&mut self) {
        self.hydrated = true;
    }

    /// Merge a stored record over the current values field by field.
    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        if let Some(rate) = persisted.exchange_rate {
            self.settings.exchange_rate = rate;
        }
        if let Some(margin) = persisted.profit_margin {
            self.settings.profit_margin_percent = margin;
        }
        if let Some(weight) = persisted.total_billed_weight {
            self.settings.total_billed_weight = weight;
        }
        if let Some(rates) = persisted.rates {
            rates.merge_into(&mut self.rates);
        }
        if let Some(items) = persisted.items {
            self.items = restore_items(items);
        }
        self.hydrated = true;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            exchange_rate: Some(self.settings.exchange_rate),
            profit_margin: Some(self.settings.profit_margin_percent),
            total_billed_weight: Some(self.settings.total_billed_weight),
            rates: Some(PersistedRates::from(self.rates)),
            items: Some(
                self.items
                    .iter()
                    .map(|item| PersistedItem {
                        id: Some(item.id),
                        name: Some(item.name.clone()),
                        price: Some(item.unit_price_source),
                        quantity: Some(item.quantity),
                        weight: Some(item.unit_weight),
                    })
                    .collect(),
            ),
        }
    }

    /// The record to write, or `None` while loading is still pending so defaults never
    /// overwrite stored data.
    pub fn autosave_snapshot(&self) -> Option<PersistedState> {
        self.hydrated.then(|| self.to_persisted())
    }
}

/// Stored form of the calculator inputs. Every field is optional so older or
/// hand-edited files still load, and a field holding the wrong type reads as absent
/// instead of failing the whole record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub profit_margin: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub total_billed_weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub rates: Option<PersistedRates>,
    #[serde(default, deserialize_with = "lenient_items", skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<PersistedItem>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedRates {
    #[serde(rename = "intlRateKRW", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub international: Option<f64>,
    #[serde(rename = "taxDomesticRateTWD", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub duty_and_domestic: Option<f64>,
    #[serde(rename = "boxCostKRW", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub box_cost: Option<f64>,
}

impl PersistedRates {
    fn merge_into(self, rates: &mut RateConfig) {
        if let Some(value) = self.international {
            rates.international_rate_per_kg = value;
        }
        if let Some(value) = self.duty_and_domestic {
            rates.duty_and_domestic_rate_per_kg = value;
        }
        if let Some(value) = self.box_cost {
            rates.box_cost_fixed = value;
        }
    }
}

impl From<RateConfig> for PersistedRates {
    fn from(rates: RateConfig) -> Self {
        Self {
            international: Some(rates.international_rate_per_kg),
            duty_and_domestic: Some(rates.duty_and_domestic_rate_per_kg),
            box_cost: Some(rates.box_cost_fixed),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedItem {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<LineItemId>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "priceKRW", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Any JSON value is accepted; one that does not fit `T` becomes `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Keeps the rows that are objects. A non-array value reads as absent.
fn lenient_items<'de, D>(deserializer: D) -> Result<Option<Vec<PersistedItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(rows) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        rows.into_iter()
            .filter_map(|row| PersistedItem::deserialize(row).ok())
            .collect(),
    ))
}

/// Rows missing an id, or repeating one, get the next free id after the largest
/// stored one. Missing numeric fields become zero.
fn restore_items(stored: Vec<PersistedItem>) -> Vec<LineItem> {
    let mut next_free = stored
        .iter()
        .filter_map(|item| item.id)
        .max()
        .map_or(1, |max| max.saturating_add(1));
    let mut seen = HashSet::with_capacity(stored.len());

    stored
        .into_iter()
        .map(|item| {
            let id = match item.id {
                Some(id) if seen.insert(id) => id,
                _ => {
                    let id = next_free;
                    next_free = next_free.saturating_add(1);
                    seen.insert(id);
                    id
                }
            };
            LineItem {
                id,
                name: item.name.unwrap_or_default(),
                unit_price_source: item.price.unwrap_or_default(),
                quantity: item.quantity.unwrap_or_default(),
                unit_weight: item.weight.unwrap_or_default(),
            }
        })
        .collect()
}

/// Read a number the way a lenient form field does: the longest leading decimal
/// literal counts, anything else is zero.
pub fn parse_number(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digit_count = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digit_count += frac_end - (end + 1);
        end = frac_end;
    }
    if digit_count == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    text[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AllocationMode;
    use rstest::*;

    #[rstest]
    #[case("42", 42.0)]
    #[case("  3.5", 3.5)]
    #[case("12.5kg", 12.5)]
    #[case("-7", -7.0)]
    #[case("+2", 2.0)]
    #[case(".25", 0.25)]
    #[case("5.", 5.0)]
    #[case("1e3", 1000.0)]
    #[case("2E-1x", 0.2)]
    #[case("4e", 4.0)]
    #[case("", 0.0)]
    #[case("abc", 0.0)]
    #[case(".", 0.0)]
    #[case("-", 0.0)]
    #[case("1e999", 0.0)]
    #[case("NaN", 0.0)]
    #[case("Infinity", 0.0)]
    fn parses_form_numbers(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(parse_number(raw), expected);
    }

    #[test]
    fn add_item_uses_next_id_and_defaults() {
        let mut state = AppState::default();
        let id = state.add_item();

        assert_eq!(id, 4);
        let added = state.items.last().unwrap();
        assert_eq!(added, &LineItem::blank(4));
        assert_eq!(added.quantity, 1.0);
        assert_eq!(added.unit_weight, 0.5);
    }

    #[test]
    fn add_item_to_empty_batch_starts_at_one() {
        let mut state = AppState::default();
        state.clear_items();
        assert_eq!(state.add_item(), 1);
    }

    #[test]
    fn cleared_batch_is_saved_as_an_empty_list() {
        let mut state = AppState::default();
        state.mark_hydrated();
        state.clear_items();

        let snapshot = state.autosave_snapshot().expect("hydrated state saves");
        assert_eq!(snapshot.items, Some(Vec::new()));
        assert_eq!(state.allocation().totals.grand_total_cost, 0.0);
    }

    #[test]
    fn ids_follow_the_largest_not_the_count() {
        let mut state = AppState::default();
        assert!(state.remove_item(2));
        assert_eq!(state.add_item(), 4);
        assert!(state.remove_item(4));
        assert!(state.remove_item(3));
        assert_eq!(state.add_item(), 2);
    }

    #[test]
    fn remove_unknown_item_is_noop() {
        let mut state = AppState::default();
        assert!(!state.remove_item(99));
        assert_eq!(state.items.len(), 3);
    }

    #[test]
    fn edits_parse_numbers_leniently() {
        let mut state = AppState::default();
        assert!(state.apply_edit(1, ItemEdit::Quantity("oops".into())));
        assert!(state.apply_edit(1, ItemEdit::Weight("0.75".into())));
        assert!(state.apply_edit(1, ItemEdit::Price("99000 won".into())));
        assert!(state.apply_edit(1, ItemEdit::Name("Coat".into())));

        let item = &state.items[0];
        assert_eq!(item.quantity, 0.0);
        assert_eq!(item.unit_weight, 0.75);
        assert_eq!(item.unit_price_source, 99000.0);
        assert_eq!(item.name, "Coat");
    }

    #[test]
    fn edit_unknown_item_reports_false() {
        let mut state = AppState::default();
        let before = state.clone();
        assert!(!state.apply_edit(42, ItemEdit::Name("ghost".into())));
        assert_eq!(state, before);
    }

    #[test]
    fn rate_and_batch_setters() {
        let mut state = AppState::default();
        state.set_rate(RateKind::International, "3000");
        state.set_rate(RateKind::DutyAndDomestic, "");
        state.set_rate(RateKind::Box, "-5");
        state.set_exchange_rate("0.0231");
        state.set_profit_margin("x");
        state.set_total_billed_weight("12.5");

        assert_eq!(state.rates.international_rate_per_kg, 3000.0);
        assert_eq!(state.rates.duty_and_domestic_rate_per_kg, 0.0);
        assert_eq!(state.rates.box_cost_fixed, -5.0);
        assert_eq!(state.settings.exchange_rate, 0.0231);
        assert_eq!(state.settings.profit_margin_percent, 0.0);
        assert_eq!(state.settings.total_billed_weight, 12.5);
    }

    #[test]
    fn allocation_follows_every_mutation() {
        let mut state = AppState::default();
        let before = state.allocation();
        assert_eq!(before.totals.mode, AllocationMode::Weight);

        for id in [1, 2, 3] {
            state.apply_edit(id, ItemEdit::Weight("0".into()));
        }
        let after = state.allocation();
        assert_eq!(after.totals.mode, AllocationMode::Quantity);
        assert_eq!(after.results.len(), 3);
        assert_ne!(before.totals.grand_total_cost, after.totals.grand_total_cost);
    }

    #[test]
    fn autosave_waits_for_hydration() {
        let mut state = AppState::default();
        assert!(state.autosave_snapshot().is_none());

        state.mark_hydrated();
        assert_eq!(state.autosave_snapshot(), Some(state.to_persisted()));
    }

    #[test]
    fn reset_keeps_hydration() {
        let mut state = AppState::default();
        state.apply_persisted(PersistedState::default());
        state.clear_items();
        state.set_exchange_rate("1");

        state.reset_defaults();
        assert!(state.is_hydrated());
        assert_eq!(state.items, seed_items());
        assert_eq!(state.settings, BatchSettings::default());
    }

    #[test]
    fn partial_record_keeps_defaults_for_missing_fields() {
        let stored: PersistedState =
            serde_json::from_str(r#"{ "profitMargin": 45, "rates": { "boxCostKRW": 5000 }, "exchangeRate": null }"#)
                .unwrap();

        let mut state = AppState::default();
        state.apply_persisted(stored);

        assert!(state.is_hydrated());
        assert_eq!(state.settings.profit_margin_percent, 45.0);
        assert_eq!(state.settings.exchange_rate, 0.024);
        assert_eq!(state.settings.total_billed_weight, 10.0);
        assert_eq!(state.rates.box_cost_fixed, 5000.0);
        assert_eq!(state.rates.international_rate_per_kg, 2500.0);
        assert_eq!(state.items, seed_items());
    }

    #[test]
    fn mistyped_fields_are_skipped_without_losing_the_rest() {
        let stored: PersistedState = serde_json::from_str(
            r#"{
                "exchangeRate": "0.03",
                "profitMargin": 55,
                "totalBilledWeight": [4],
                "rates": { "intlRateKRW": "fast", "boxCostKRW": 4100 },
                "items": [
                    { "id": 9, "name": "Boots", "priceKRW": 64000, "quantity": "3", "weight": 1.1 },
                    17,
                    { "id": 10, "name": 42, "priceKRW": 900, "quantity": 4, "weight": 0.02 }
                ]
            }"#,
        )
        .unwrap();

        let mut state = AppState::default();
        state.apply_persisted(stored);

        assert_eq!(state.settings.exchange_rate, 0.024);
        assert_eq!(state.settings.profit_margin_percent, 55.0);
        assert_eq!(state.settings.total_billed_weight, 10.0);
        assert_eq!(state.rates.international_rate_per_kg, 2500.0);
        assert_eq!(state.rates.box_cost_fixed, 4100.0);

        let ids: Vec<_> = state.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![9, 10]);
        assert_eq!(state.items[0].name, "Boots");
        assert_eq!(state.items[0].unit_price_source, 64000.0);
        assert_eq!(state.items[0].quantity, 0.0);
        assert_eq!(state.items[1].name, "");
        assert_eq!(state.items[1].quantity, 4.0);
    }

    #[test]
    fn non_array_items_keep_seed_rows() {
        let stored: PersistedState =
            serde_json::from_str(r#"{ "items": { "id": 1 }, "profitMargin": 12 }"#).unwrap();
        let mut state = AppState::default();
        state.apply_persisted(stored);

        assert_eq!(state.items, seed_items());
        assert_eq!(state.settings.profit_margin_percent, 12.0);
    }

    #[test]
    fn stored_empty_item_list_replaces_seed_rows() {
        let stored: PersistedState = serde_json::from_str(r#"{ "items": [] }"#).unwrap();
        let mut state = AppState::default();
        state.apply_persisted(stored);
        assert!(state.items.is_empty());
    }

    #[test]
    fn restored_items_get_unique_ids() {
        let stored: PersistedState = serde_json::from_str(
            r#"{ "items": [
                { "id": 5, "name": "a", "priceKRW": 100, "quantity": 1, "weight": 0.1 },
                { "name": "no id", "quantity": 2 },
                { "id": 5, "name": "dup" }
            ] }"#,
        )
        .unwrap();
        let mut state = AppState::default();
        state.apply_persisted(stored);

        let ids: Vec<_> = state.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![5, 6, 7]);
        assert_eq!(state.items[1].unit_price_source, 0.0);
        assert_eq!(state.items[1].quantity, 2.0);
        assert_eq!(state.items[2].name, "dup");
    }

    #[test]
    fn persisted_json_uses_stored_field_names() {
        let state = AppState::default();
        let json = serde_json::to_value(state.to_persisted()).unwrap();

        assert_eq!(json["exchangeRate"], 0.024);
        assert_eq!(json["profitMargin"], 30.0);
        assert_eq!(json["totalBilledWeight"], 10.0);
        assert_eq!(json["rates"]["intlRateKRW"], 2500.0);
        assert_eq!(json["rates"]["taxDomesticRateTWD"], 200.0);
        assert_eq!(json["rates"]["boxCostKRW"], 3000.0);
        assert_eq!(json["items"][0]["id"], 1);
        assert_eq!(json["items"][0]["priceKRW"], 150000.0);
        assert_eq!(json["items"][2]["weight"], 0.05);
    }

    #[test]
    fn round_trip_reproduces_inputs_and_results() {
        let mut original = AppState::default();
        original.mark_hydrated();
        original.add_item();
        original.apply_edit(4, ItemEdit::Name("Scarf".into()));
        original.apply_edit(4, ItemEdit::Price("8800".into()));
        original.set_rate(RateKind::Box, "4200");
        original.set_total_billed_weight("7.3");

        let json = serde_json::to_string(&original.to_persisted()).unwrap();
        let stored: PersistedState = serde_json::from_str(&json).unwrap();

        let mut reloaded = AppState::default();
        reloaded.apply_persisted(stored);

        assert_eq!(reloaded, original);
        assert_eq!(reloaded.allocation(), original.allocation());
    }
}
