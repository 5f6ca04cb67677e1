//! egui rendering. Every function here reads [`AppState`](crate::state::AppState)
//! and renders it; state changes go through the `AppState` methods.

pub mod panels;
pub mod plot;
pub mod tables;
