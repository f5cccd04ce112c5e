//! Invidious provider: YouTube search over community mirror instances.

pub mod adapter;
pub mod client;
pub mod dto;

pub use client::InvidiousClient;
