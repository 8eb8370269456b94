//! Shared HTTP plumbing for modules that talk to remote REST services.

pub mod client;

pub use client::TracedClient;
