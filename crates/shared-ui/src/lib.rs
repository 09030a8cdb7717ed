//! Presentational components shared by the app's pages.

pub mod components;

pub use components::*;
