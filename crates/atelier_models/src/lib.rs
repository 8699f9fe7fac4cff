//! Direct LLM provider backends for Atelier.
//!
//! Currently one provider is wired: the Anthropic Messages API, used as the
//! default generation backend with streaming support. The gateway backend
//! lives in `atelier_gateway`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod anthropic;
mod prompt;

pub use anthropic::AnthropicClient;
pub use prompt::{build_system_prompt, build_user_text};
