//! Library crate for ping-sweep-rs exposing reusable modules.
pub mod addrs;
pub mod config;
pub mod pipeline;
pub mod probe;
pub mod types;
