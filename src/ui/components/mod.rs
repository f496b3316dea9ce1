pub mod kpi_card;
pub mod line_table;
pub mod number_field;
pub mod rates_panel;
pub mod toast;
pub mod weight_badge;
