use std::str::FromStr;

use async_trait::async_trait;
use azstore_core::{Context, Error, Result, SignRequest};
use http::request::Parts;
use http::uri::PathAndQuery;
use http::Uri;

use crate::Credential;

/// Default signer of storage clients.
///
/// SAS tokens are appended to the query string and anonymous requests are
/// passed through. Shared key signatures are computed by an external signer
/// installed with [`crate::ServiceClient::with_signer`].
#[derive(Debug, Default)]
pub struct RequestSigner;

impl RequestSigner {
    /// Create a new request signer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        match credential {
            None => Ok(()),
            Some(Credential::SasToken { token }) => append_query(req, token),
            Some(Credential::SharedKey { .. }) => Err(Error::request_invalid(
                "shared key credential requires a signer, install one with ServiceClient::with_signer",
            )),
        }
    }
}

/// Appends a raw, already encoded query string to the request uri.
fn append_query(req: &mut Parts, query: &str) -> Result<()> {
    let query = query.trim_start_matches('?');
    if query.is_empty() {
        return Ok(());
    }

    let mut parts = std::mem::take(&mut req.uri).into_parts();
    let paq = match parts.path_and_query.as_ref() {
        Some(paq) => match paq.query() {
            Some(existing) if !existing.is_empty() => {
                format!("{}?{existing}&{query}", paq.path())
            }
            _ => format!("{}?{query}", paq.path()),
        },
        None => format!("/?{query}"),
    };
    parts.path_and_query = Some(PathAndQuery::from_str(&paq)?);
    req.uri = Uri::from_parts(parts)?;

    Ok(())
}
