use std::env;

use anyhow::Result;
use azstore_core::{Context, OsEnv};
use azstore_http_send_reqwest::ReqwestHttpSend;
use azstore_storage::{ClientKind, Config, ServiceClient};
use http::HeaderValue;
use log::warn;

use super::init_logger;

/// Builds a SAS authorized blob client from `AZSTORE_STORAGE_*` variables.
///
/// Returns `None` unless `AZSTORE_STORAGE_TEST` is `on`.
fn init_live_test() -> Option<ServiceClient> {
    init_logger();
    dotenv::from_filename(".env").ok();

    if env::var("AZSTORE_STORAGE_TEST").unwrap_or_default() != "on" {
        return None;
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::new()
        .with_account_name(
            env::var("AZSTORE_STORAGE_ACCOUNT_NAME").expect("env AZSTORE_STORAGE_ACCOUNT_NAME must set"),
        )
        .with_sas_token(
            env::var("AZSTORE_STORAGE_SAS_TOKEN").expect("env AZSTORE_STORAGE_SAS_TOKEN must set"),
        );

    Some(ServiceClient::new(ctx, ClientKind::BlockBlob, &config).expect("client must build"))
}

#[tokio::test]
async fn test_live_container_lifecycle() -> Result<()> {
    let Some(client) = init_live_test() else {
        warn!("AZSTORE_STORAGE_TEST is not set, skipped");
        return Ok(());
    };

    let name = format!("azstore-{}", std::process::id());
    let client = client.with_request_hook(|req| {
        if req.method == http::Method::PUT {
            req.headers
                .insert("x-ms-meta-hello", HeaderValue::from_static("world"));
        }
    });

    client.create_container(&name).await?;
    assert!(client.exists(&name).await?);

    let metadata = client.get_container_metadata(&name).await?;
    assert_eq!(metadata.get("hello").map(String::as_str), Some("world"));

    client.delete_container(&name).await?;
    Ok(())
}

#[tokio::test]
async fn test_live_missing_container() -> Result<()> {
    let Some(client) = init_live_test() else {
        warn!("AZSTORE_STORAGE_TEST is not set, skipped");
        return Ok(());
    };

    assert!(!client.exists("azstore-not-exist").await?);
    Ok(())
}
