use dioxus::prelude::*;

use crate::domain::{ItemEdit, LineItemId, LineResult, SOURCE_CURRENCY};
use crate::ui::theme::{self, Accent};
use crate::util::format;

#[derive(Clone, PartialEq)]
pub struct LineRow {
    pub id: LineItemId,
    pub name: String,
    pub unit_weight: f64,
    pub unit_price_source: f64,
    pub quantity: f64,
    pub handling_fee: f64,
    pub unit_shipping_share: f64,
    pub final_unit_cost: f64,
    pub suggested_price: f64,
}

impl From<&LineResult> for LineRow {
    fn from(line: &LineResult) -> Self {
        Self {
            id: line.item.id,
            name: line.item.name.clone(),
            unit_weight: line.item.unit_weight,
            unit_price_source: line.item.unit_price_source,
            quantity: line.item.quantity,
            handling_fee: line.handling_fee,
            unit_shipping_share: line.unit_shipping_share(),
            final_unit_cost: line.final_unit_cost,
            suggested_price: line.suggested_price,
        }
    }
}

#[component]
pub fn LineTable(
    rows: Vec<LineRow>,
    on_edit: EventHandler<(LineItemId, ItemEdit)>,
    on_remove: EventHandler<LineItemId>,
) -> Element {
    let is_empty = rows.is_empty();
    rsx! {
        div {
            class: "{theme::table_container()}",
            table {
                thead {
                    class: "{theme::table_header()}",
                    tr {
                        th { style: "width: 2rem" }
                        th { "Item" }
                        th { class: "num", "Unit kg" }
                        th { class: "num", "Unit price ({SOURCE_CURRENCY})" }
                        th { class: "num", "Qty" }
                        th { class: "num cell-detail", "3% fee" }
                        th { class: "num cell-detail", "Shipping share" }
                        th { class: "num", "Landed cost" }
                        th { class: "num", "Suggested price" }
                    }
                }
                tbody {
                    for row in rows {
                        LineRowView {
                            key: "{row.id}",
                            row,
                            on_edit,
                            on_remove,
                        }
                    }
                    if is_empty {
                        tr {
                            td {
                                class: "cell-empty",
                                colspan: "9",
                                "Add an item to start allocating shipment costs."
                            }
                        }
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct LineRowViewProps {
    row: LineRow,
    on_edit: EventHandler<(LineItemId, ItemEdit)>,
    on_remove: EventHandler<LineItemId>,
}

#[component]
fn LineRowView(props: LineRowViewProps) -> Element {
    let row = props.row;
    let id = row.id;
    let on_edit = props.on_edit;

    rsx! {
        tr {
            td {
                class: "cell",
                button {
                    class: "{theme::btn_remove()}",
                    title: "Remove item",
                    onclick: move |_| props.on_remove.call(id),
                    "✕"
                }
            }
            td {
                class: "cell",
                input {
                    class: "{theme::cell_input(false)}",
                    r#type: "text",
                    placeholder: "Item name",
                    value: "{row.name}",
                    oninput: move |evt| on_edit.call((id, ItemEdit::Name(evt.value()))),
                }
            }
            td {
                class: "cell",
                input {
                    class: "{theme::cell_input(true)}",
                    r#type: "number",
                    step: "0.1",
                    placeholder: "0",
                    value: format::input_or_blank(row.unit_weight),
                    oninput: move |evt| on_edit.call((id, ItemEdit::Weight(evt.value()))),
                }
            }
            td {
                class: "cell",
                input {
                    class: "{theme::cell_input(true)}",
                    r#type: "number",
                    value: format::input_or_blank(row.unit_price_source),
                    oninput: move |evt| on_edit.call((id, ItemEdit::Price(evt.value()))),
                }
            }
            td {
                class: "cell",
                input {
                    class: "{theme::cell_input(true)}",
                    r#type: "number",
                    value: format::input_or_blank(row.quantity),
                    oninput: move |evt| on_edit.call((id, ItemEdit::Quantity(evt.value()))),
                }
            }
            td { class: "{theme::detail_cell()}", "${format::money(row.handling_fee)}" }
            td { class: "{theme::detail_cell()}", "${format::money(row.unit_shipping_share)}" }
            td { class: "{theme::accent_cell(Accent::Cost)}", "${format::money(row.final_unit_cost)}" }
            td { class: "{theme::accent_cell(Accent::Price)}", "${format::money(row.suggested_price)}" }
        }
    }
}
