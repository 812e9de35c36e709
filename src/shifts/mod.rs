//! Shift resource: wire types, endpoint calls and the reactive store

mod api;
mod store;
mod types;

pub use api::ShiftsApi;
pub use store::{ShiftState, ShiftStore};
pub use types::{NewShift, Shift};
