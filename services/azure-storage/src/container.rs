//! Blob container operations.
//!
//! - [Create Container](https://learn.microsoft.com/en-us/rest/api/storageservices/create-container)
//! - [Get Container Metadata](https://learn.microsoft.com/en-us/rest/api/storageservices/get-container-metadata)
//! - [Delete Container](https://learn.microsoft.com/en-us/rest/api/storageservices/delete-container)

use std::collections::HashMap;

use azstore_core::{Error, Result};
use bytes::Bytes;
use http::{Method, StatusCode};

use crate::constants::X_MS_META_PREFIX;
use crate::{ServiceClient, ServiceType};

const RESTYPE_CONTAINER: (&str, &str) = ("restype", "container");
const COMP_METADATA: (&str, &str) = ("comp", "metadata");

impl ServiceClient {
    /// Create a container.
    pub async fn create_container(&self, name: &str) -> Result<()> {
        self.ensure_blob()?;

        let resp = self.send(Method::PUT, name, &[RESTYPE_CONTAINER]).await?;
        check_status(&resp)
    }

    /// Get the user defined metadata of a container, without the `x-ms-meta-` prefix.
    pub async fn get_container_metadata(&self, name: &str) -> Result<HashMap<String, String>> {
        self.ensure_blob()?;

        let resp = self
            .send(Method::GET, name, &[RESTYPE_CONTAINER, COMP_METADATA])
            .await?;
        check_status(&resp)?;

        resp.headers()
            .iter()
            .filter_map(|(k, v)| {
                k.as_str()
                    .strip_prefix(X_MS_META_PREFIX)
                    .map(|name| (name, v))
            })
            .map(|(name, v)| -> Result<(String, String)> {
                let value = v.to_str().map_err(|e| {
                    Error::unexpected(format!("metadata {name} is not valid utf-8"))
                        .with_source(anyhow::Error::new(e))
                })?;
                Ok((name.to_string(), value.to_string()))
            })
            .collect()
    }

    /// Check whether a container exists.
    pub async fn exists(&self, name: &str) -> Result<bool> {
        self.ensure_blob()?;

        let resp = self.send(Method::HEAD, name, &[RESTYPE_CONTAINER]).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        check_status(&resp)?;
        Ok(true)
    }

    /// Delete a container.
    pub async fn delete_container(&self, name: &str) -> Result<()> {
        self.ensure_blob()?;

        let resp = self.send(Method::DELETE, name, &[RESTYPE_CONTAINER]).await?;
        check_status(&resp)
    }

    fn ensure_blob(&self) -> Result<()> {
        if self.service_type() != ServiceType::Blob {
            return Err(Error::request_invalid(format!(
                "container operations need a blob client, got a {} client",
                self.service_type()
            )));
        }
        Ok(())
    }
}

fn check_status(resp: &http::Response<Bytes>) -> Result<()> {
    if resp.status().is_success() {
        return Ok(());
    }

    Err(Error::unexpected(format!(
        "storage service responded with {}: {}",
        resp.status(),
        String::from_utf8_lossy(resp.body())
    )))
}
