use dioxus::prelude::*;

use crate::{
    domain::{
        weight_gap, AppState, ItemEdit, LineItemId, RateKind, SOURCE_CURRENCY, TARGET_CURRENCY,
    },
    ui::{
        components::{
            kpi_card::KpiCard,
            line_table::{LineRow, LineTable},
            rates_panel::RatesPanel,
            toast::{push_toast, ToastKind, ToastMessage},
            weight_badge::WeightBadge,
        },
        theme::{self, Accent},
    },
    util::format,
};

#[component]
pub fn CalculatorPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let (rates, settings) = state.with(|st| (st.rates, st.settings));
    let allocation = state.with(|st| st.allocation());
    let totals = allocation.totals;
    let gap = weight_gap(&totals, settings.total_billed_weight);
    let rows: Vec<LineRow> = allocation.results.iter().map(LineRow::from).collect();
    let line_count = rows.len();

    let on_edit = move |(id, edit): (LineItemId, ItemEdit)| {
        state.with_mut(|st| st.apply_edit(id, edit));
    };

    let on_remove = move |id: LineItemId| {
        let removed = state.with_mut(|st| st.remove_item(id));
        if removed {
            push_toast(toasts, ToastKind::Info, "Item removed.");
        }
    };

    let on_add = move |_: MouseEvent| {
        let id = state.with_mut(|st| st.add_item());
        tracing::debug!(id, "added line item");
        push_toast(toasts, ToastKind::Success, "Item added.");
    };

    let on_reset = move |_: MouseEvent| {
        state.with_mut(|st| st.reset_defaults());
        push_toast(toasts, ToastKind::Warning, "Restored default rates and sample items.");
    };

    let on_clear = move |_: MouseEvent| {
        if state.with(|st| st.items.is_empty()) {
            return;
        }
        state.with_mut(|st| st.clear_items());
        push_toast(toasts, ToastKind::Warning, "Removed every line item.");
    };

    let on_rate = move |(kind, raw): (RateKind, String)| {
        state.with_mut(|st| st.set_rate(kind, &raw));
    };

    let on_billed_weight = move |raw: String| {
        state.with_mut(|st| st.set_total_billed_weight(&raw));
    };

    rsx! {
        div {
            section { class: "kpi-grid",
                KpiCard {
                    title: format!("Landed cost ({TARGET_CURRENCY})"),
                    value: format::money(totals.grand_total_cost),
                    description: Some("Goods, handling and shipping for the whole batch".to_string()),
                    accent: Accent::Cost,
                }
                KpiCard {
                    title: format!("Goods value ({SOURCE_CURRENCY})"),
                    value: format::money(totals.total_source_value),
                    description: Some("Unit price × quantity, before conversion".to_string()),
                    accent: Accent::Neutral,
                }
                KpiCard {
                    title: "Units".to_string(),
                    value: format::money(totals.total_quantity),
                    description: Some(format!("{line_count} line items")),
                    accent: Accent::Neutral,
                }
            }

            section { class: "calculator-grid",
                RatesPanel {
                    rates,
                    total_billed_weight: settings.total_billed_weight,
                    exchange_rate: settings.exchange_rate,
                    totals: totals.clone(),
                    on_rate,
                    on_billed_weight,
                }

                div { class: "{theme::panel()}",
                    div { class: "{theme::panel_header()}",
                        div {
                            "Line items "
                            WeightBadge {
                                declared_kg: totals.total_item_weight,
                                gap_kg: gap,
                                mode: totals.mode,
                            }
                        }
                        div { style: "display: flex; gap: 0.5rem",
                            button { class: "{theme::btn_ghost()}", onclick: on_clear, "Clear" }
                            button { class: "{theme::btn_ghost()}", onclick: on_reset, "Reset" }
                            button { class: "{theme::btn_primary()}", onclick: on_add, "+ Add item" }
                        }
                    }
                    LineTable { rows, on_edit, on_remove }
                    Explainer {}
                }
            }
        }
    }
}

#[component]
fn Explainer() -> Element {
    rsx! {
        div { class: "explainer",
            strong { "How costs are allocated" }
            ol {
                li { "Freight and duty are charged on the billed weight: rate per kg × billed kg." }
                li {
                    "Each line carries a share proportional to unit weight × quantity. "
                    "When no line declares a weight, the share follows quantity instead."
                }
                li { "The box fee is always shared by quantity." }
                li { "A 3% handling fee is added to every converted unit price." }
            }
        }
    }
}
