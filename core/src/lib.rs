//! Core components shared by azstore service clients.
//!
//! ## Overview
//!
//! - **Context**: holds the environment and HTTP transport implementations
//! - **Traits**: [`HttpSend`] for sending requests, [`Env`] for environment
//!   access and [`SignRequest`] for authorizing requests
//! - **Error**: a single [`Error`] type whose [`ErrorKind`] separates
//!   configuration defects from runtime failures
//!
//! ## Utilities
//!
//! - [`utils`]: data redaction for `Debug` output

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod utils;

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod api;
pub use api::SignRequest;

mod error;
pub use error::{Error, ErrorKind, Result};
