//! Aggregator-workers provider: multi-engine fan-out behind one endpoint.

pub mod adapter;
pub mod client;
pub mod dto;

pub use client::WorkersClient;
