//! Azure Storage service clients
//!
//! This crate resolves the identity and endpoints of blob, queue, table and
//! file clients from either direct parameters or a connection string:
//!
//! - account name with an account key or a SAS token
//! - anonymous blob access by account name or custom domain
//! - alternate clouds through the endpoint suffix
//! - the local development storage emulator
//!
//! # Example
//!
//! ```rust,no_run
//! use azstore_core::{Context, OsEnv};
//! use azstore_http_send_reqwest::ReqwestHttpSend;
//! use azstore_storage::{ClientKind, Config, ServiceClient};
//!
//! #[tokio::main]
//! async fn main() -> azstore_core::Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     // Read AZURE_STORAGE_* variables, or the connection string.
//!     let config = Config::new().from_env(&ctx);
//!     let client = ServiceClient::new(ctx, ClientKind::BlockBlob, &config)?
//!         .with_request_hook(|req| {
//!             if req.method == http::Method::PUT {
//!                 req.headers.insert("x-ms-meta-hello", "world".parse().unwrap());
//!             }
//!         });
//!
//!     client.create_container("mycontainer").await?;
//!     println!("{:?}", client.get_container_metadata("mycontainer").await?);
//!     client.delete_container("mycontainer").await?;
//!
//!     Ok(())
//! }
//! ```

mod constants;

mod service;
pub use service::{ClientKind, ServiceType};

mod protocol;
pub use protocol::Protocol;

mod config;
pub use config::Config;

mod connection_string;

mod parameters;
pub use parameters::ServiceParameters;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::RequestSigner;

mod hook;
pub use hook::{RequestHook, ResponseHook};

mod client;
pub use client::ServiceClient;

mod container;

pub use constants::{DEFAULT_ENDPOINT_SUFFIX, DEV_ACCOUNT_KEY, DEV_ACCOUNT_NAME};
