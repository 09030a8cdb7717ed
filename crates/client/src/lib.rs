//! Client side of the password-reset page: talks to the reset backend and
//! tracks which view the page should show.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`api`] | `ResetBackend` trait, reqwest-backed `HttpBackend`, response classification, timeouts |
//! | [`config`] | Loads `ClientConfig` once from `config.toml` and the environment |
//! | [`flow`] | `ResetFlow`, the state controller behind the page |

pub mod api;
pub mod config;
pub mod flow;
mod platform;
