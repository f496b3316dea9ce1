use dioxus::prelude::*;

use crate::app::LastSaved;
use crate::domain::{AppState, SOURCE_CURRENCY, TARGET_CURRENCY};
use crate::util::{
    format,
    version::{version_label, APP_NAME},
};

#[component]
pub fn Shell(children: Element) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let LastSaved(last_saved) = use_context::<LastSaved>();
    let settings = state.with(|st| st.settings);

    let fx_label = format!("Exchange rate ({SOURCE_CURRENCY}→{TARGET_CURRENCY})");
    let saved_label = match last_saved() {
        Some(at) => format!("Saved {at}"),
        None => "Not saved yet".to_string(),
    };

    rsx! {
        div { class: "app-shell",
            header { class: "app-header",
                div {
                    h1 { class: "app-title", "{APP_NAME}" }
                    p { class: "app-subtitle",
                        "Spread freight, duty and box fees by weight to price each item"
                    }
                }
                div { class: "header-controls",
                    HeaderField {
                        label: fx_label,
                        value: format::input_value(settings.exchange_rate),
                        step: "0.001",
                        oninput: move |raw: String| state.with_mut(|st| st.set_exchange_rate(&raw)),
                    }
                    HeaderField {
                        label: "Profit margin %".to_string(),
                        value: format::input_value(settings.profit_margin_percent),
                        step: "1",
                        oninput: move |raw: String| state.with_mut(|st| st.set_profit_margin(&raw)),
                    }
                }
            }
            main { class: "app-main",
                {children}
            }
            footer { class: "app-footer",
                span { "{APP_NAME} {version_label()}" }
                span { "{saved_label}" }
            }
        }
    }
}

#[component]
fn HeaderField(
    label: String,
    value: String,
    step: &'static str,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            label { class: "field-label", "{label}" }
            input {
                r#type: "number",
                step: step,
                value: value,
                oninput: move |evt| oninput.call(evt.value()),
            }
        }
    }
}
