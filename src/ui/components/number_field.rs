use dioxus::prelude::*;

use crate::ui::theme;

/// Labelled numeric input. Emits the raw text; parsing happens in the state store.
#[component]
pub fn NumberField(
    label: String,
    value: String,
    oninput: EventHandler<String>,
    prefix: Option<&'static str>,
    hint: Option<String>,
    #[props(default = false)] emphasis: bool,
    #[props(default = "any")] step: &'static str,
) -> Element {
    let input_class = if emphasis {
        theme::input_emphasis()
    } else {
        theme::input_class()
    };

    rsx! {
        div {
            label { class: "{theme::label_class()}", "{label}" }
            div { class: "field-wrap",
                if let Some(symbol) = prefix {
                    span { class: "field-prefix", "{symbol}" }
                }
                input {
                    class: "{input_class}",
                    r#type: "number",
                    step: step,
                    value: value,
                    oninput: move |evt| oninput.call(evt.value()),
                }
            }
            if let Some(text) = hint {
                p { class: "field-hint", "{text}" }
            }
        }
    }
}
