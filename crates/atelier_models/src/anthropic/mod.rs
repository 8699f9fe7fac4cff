//! Anthropic Messages API backend.

mod client;
mod dto;
mod sse;

pub use client::AnthropicClient;
