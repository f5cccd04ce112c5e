//! iTunes Search provider: metadata-rich preview fallback.

pub mod adapter;
pub mod client;
pub mod dto;

pub use client::ITunesClient;
