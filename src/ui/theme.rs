//! Class names shared across the calculator views. The rules live in `assets/main.css`.

/// Colour family for a figure, keyed by what kind of cost it shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accent {
    Neutral,
    Freight,
    Duty,
    Handling,
    Box,
    Cost,
    Price,
}

// ============================================
// LAYOUT
// ============================================

pub fn panel() -> &'static str {
    "panel"
}

pub fn panel_header() -> &'static str {
    "panel-header"
}

pub fn panel_body() -> &'static str {
    "panel-body"
}

pub fn highlight_box() -> &'static str {
    "highlight-box"
}

// ============================================
// BUTTONS
// ============================================

pub fn btn_primary() -> &'static str {
    "btn btn-primary"
}

pub fn btn_ghost() -> &'static str {
    "btn btn-ghost"
}

pub fn btn_remove() -> &'static str {
    "icon-btn icon-btn-danger"
}

// ============================================
// INPUTS
// ============================================

pub fn label_class() -> &'static str {
    "field-label"
}

pub fn input_class() -> &'static str {
    "field-input"
}

pub fn input_emphasis() -> &'static str {
    "field-input field-input-lg"
}

pub fn cell_input(numeric: bool) -> &'static str {
    if numeric {
        "cell-input cell-input-num"
    } else {
        "cell-input"
    }
}

// ============================================
// TABLES
// ============================================

pub fn table_container() -> &'static str {
    "table-wrap"
}

pub fn table_header() -> &'static str {
    "table-head"
}

pub fn detail_cell() -> &'static str {
    "cell cell-num cell-detail"
}

// ============================================
// TEXT
// ============================================

pub fn text_muted() -> &'static str {
    "muted"
}

pub fn accent_text(accent: Accent) -> &'static str {
    match accent {
        Accent::Neutral => "accent-neutral",
        Accent::Freight => "accent-freight",
        Accent::Duty => "accent-duty",
        Accent::Handling => "accent-handling",
        Accent::Box => "accent-box",
        Accent::Cost => "accent-cost",
        Accent::Price => "accent-price",
    }
}

pub fn accent_cell(accent: Accent) -> &'static str {
    match accent {
        Accent::Cost => "cell cell-num cell-strong cell-cost",
        Accent::Price => "cell cell-num cell-strong cell-price",
        _ => "cell cell-num",
    }
}
