//! Interactive explorer for the 1990 California housing dataset.
//!
//! The data layer ([`data`]) and the derived values ([`summary`]) are plain
//! functions over an immutable [`data::model::HousingDataset`]; [`state`]
//! holds the widget values and the current view, and [`app`] / [`ui`] draw
//! them with egui.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod summary;
pub mod ui;
