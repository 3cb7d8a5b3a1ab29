//! Convo Client - HTTP client and async controller for conversation threads.
//!
//! This crate drives the view-model in `convo-core` against a real
//! backend:
//!
//! - **API client**: typed reqwest wrapper over the two conversation
//!   endpoints plus a health probe
//! - **Remote seam**: the `ConversationRemote` trait, implemented by
//!   `ApiClient` and by in-memory fakes in tests
//! - **Thread controller**: async reload and optimistic send cycles
//! - **Configuration**: TOML client config with a default path under
//!   the user's home directory
//!
//! The optional `cli` feature adds the `convo` binary.

pub mod api;
pub mod config;
pub mod controller;
pub mod remote;

pub use api::{ApiClient, ApiError, ConversationEnvelope, SendMessagePayload, SendMessageResponse};
pub use config::{ClientConfig, ConfigError};
pub use controller::{ClientError, ThreadController};
pub use remote::ConversationRemote;
