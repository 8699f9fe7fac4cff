//! Tool-invocation gateway client.
//!
//! The gateway exposes remote specialist tools over JSON-RPC 2.0. This crate
//! provides a client that can list those tools and invoke the
//! `execute_specialist_task` tool as an alternative generation backend.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod generate;

pub use client::{GatewayClient, ToolInfo};
pub use generate::design_system;
