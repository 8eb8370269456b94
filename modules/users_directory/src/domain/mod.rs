pub mod error;
pub mod events;
pub mod form;
pub mod pagination;
pub mod ports;
pub mod store;
