use dioxus::prelude::*;

use super::number_field::NumberField;
use crate::domain::{BatchTotals, RateConfig, RateKind, TARGET_CURRENCY};
use crate::ui::theme::{self, Accent};
use crate::util::format;

/// Billed weight, forwarder rates and the shipment-level cost summary.
#[component]
pub fn RatesPanel(
    rates: RateConfig,
    total_billed_weight: f64,
    exchange_rate: f64,
    totals: BatchTotals,
    on_rate: EventHandler<(RateKind, String)>,
    on_billed_weight: EventHandler<String>,
) -> Element {
    let box_hint = format!("≈ {TARGET_CURRENCY} {}", format::money(rates.box_cost_fixed * exchange_rate));

    rsx! {
        div { class: "{theme::panel()}",
            div { class: "{theme::panel_header()}", "Rates & weight" }
            div { class: "{theme::panel_body()}",
                div { class: "{theme::highlight_box()}",
                    NumberField {
                        label: "Billed weight (kg)".to_string(),
                        value: format::input_value(total_billed_weight),
                        hint: Some("Chargeable weight on the forwarder's invoice".to_string()),
                        emphasis: true,
                        oninput: move |raw| on_billed_weight.call(raw),
                    }
                }
                for kind in RateKind::ALL {
                    NumberField {
                        key: "{kind.label()}",
                        label: kind.label().to_string(),
                        value: format::input_value(rates.get(kind)),
                        prefix: Some(kind.symbol()),
                        hint: (kind == RateKind::Box).then(|| box_hint.clone()),
                        oninput: move |raw| on_rate.call((kind, raw)),
                    }
                }
                CostSummary { totals }
            }
        }
    }
}

#[component]
fn CostSummary(totals: BatchTotals) -> Element {
    let lines = [
        ("International freight", totals.freight_total, Accent::Freight),
        ("Duty & domestic", totals.duty_total, Accent::Duty),
        ("Handling (3%)", totals.handling_total, Accent::Handling),
        ("Box fee", totals.box_total, Accent::Box),
    ];
    let overhead = format::money(totals.overhead_total());

    rsx! {
        div { class: "summary",
            for (label, amount, accent) in lines {
                div { class: "summary-row", key: "{label}",
                    span { class: "{theme::text_muted()}", "{label}" }
                    span { class: "{theme::accent_text(accent)}", "${format::money(amount)}" }
                }
            }
            div { class: "summary-row summary-total",
                span { "Total overhead" }
                span { class: "{theme::accent_text(Accent::Duty)}", "${overhead}" }
            }
        }
    }
}
