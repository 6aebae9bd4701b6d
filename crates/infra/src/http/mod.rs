//! Retrying HTTP client shared by every AI model adapter.

mod client;

pub use client::{HttpClient, HttpClientBuilder};
