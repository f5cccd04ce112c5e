//! Jamendo provider: free-music catalog with full-track streams.

pub mod adapter;
pub mod client;
pub mod dto;
pub mod transport;

pub use client::JamendoClient;
