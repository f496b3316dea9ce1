use dioxus::prelude::*;

use crate::domain::AllocationMode;
use crate::util::format;

/// Declared batch weight, the drift from the billed weight when it matters, and the
/// allocation mode currently in effect.
#[component]
pub fn WeightBadge(declared_kg: f64, gap_kg: Option<f64>, mode: AllocationMode) -> Element {
    let mode_class = match mode {
        AllocationMode::Weight => "mode-pill mode-weight",
        AllocationMode::Quantity => "mode-pill mode-quantity",
    };
    let mode_title = match mode {
        AllocationMode::Weight => "Freight and duty follow each line's share of the declared weight",
        AllocationMode::Quantity => "No weights declared: freight and duty follow unit count",
    };

    rsx! {
        span { class: "weight-badge",
            "Declared weight: "
            strong { "{format::kilograms(declared_kg)} kg" }
            if let Some(gap) = gap_kg {
                span { class: "weight-badge-gap",
                    "({format::kilograms(gap)} kg off billed weight)"
                }
            }
        }
        span { class: "{mode_class}", title: "{mode_title}", "{mode.label()}" }
    }
}
