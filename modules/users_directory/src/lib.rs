// === PUBLIC CONTRACT ===
// Types shared with front ends: user model and the errors they may display.
pub mod contract;

pub use contract::{error, model};

// === MODULE DEFINITION ===
// Wiring of store, HTTP adapter and event publisher from configuration.
pub mod module;
pub use module::UsersDirectory;

pub mod config;
pub use config::UsersDirectoryConfig;

// === VIEW LAYER ===
// Plain-text rendering of the current page, pagination bar and form.
pub mod api;

// === INTERNAL MODULES ===
// Exposed for front ends and tests; the store, pagination and form live here.
pub mod domain;
#[doc(hidden)]
pub mod infra;
