//! Landed cost domain: inputs, the allocation engine and the state store.

pub mod allocation;
pub mod app_state;
pub mod entities;

#[allow(unused_imports)]
pub use allocation::{compute, compute_batch, weight_gap, Allocation};
#[allow(unused_imports)]
pub use app_state::{parse_number, AppState, ItemEdit, PersistedState};
#[allow(unused_imports)]
pub use entities::{
    AllocationMode, BatchSettings, BatchTotals, LineItem, LineItemId, LineResult, RateConfig,
    RateKind, SOURCE_CURRENCY, TARGET_CURRENCY,
};
