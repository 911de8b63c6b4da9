// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use azstore_core::{Context, Result, SignRequest};
use bytes::Bytes;
use http::Method;
use log::debug;

use crate::constants::{AZURE_VERSION, X_MS_VERSION};
use crate::hook::Hooks;
use crate::{
    ClientKind, Config, Credential, Protocol, RequestSigner, ServiceParameters, ServiceType,
};

/// Client of one Azure Storage service.
///
/// Construction resolves endpoints and credentials from a [`Config`] and
/// performs no I/O. The resolved parameters never change afterwards, so a
/// client can be cloned and shared across tasks.
///
/// ```
/// use azstore_core::Context;
/// use azstore_storage::{ClientKind, Config, ServiceClient};
///
/// let config = Config::new()
///     .with_connection_string("AccountName=myaccount;AccountKey=bXlrZXk=;");
/// let client = ServiceClient::new(Context::new(), ClientKind::Queue, &config)?;
///
/// assert_eq!(client.primary_endpoint(), "myaccount.queue.core.windows.net");
/// # Ok::<(), azstore_core::Error>(())
/// ```
#[derive(Clone)]
pub struct ServiceClient {
    kind: ClientKind,
    params: ServiceParameters,
    ctx: Context,
    hooks: Hooks,
    signer: Arc<dyn SignRequest<Credential = Credential>>,
}

impl Debug for ServiceClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("kind", &self.kind)
            .field("params", &self.params)
            .field("hooks", &self.hooks)
            .field("signer", &self.signer)
            .finish()
    }
}

impl ServiceClient {
    /// Create a client of `kind` from `config`.
    ///
    /// Fails with [`azstore_core::ErrorKind::MissingIdentity`] or
    /// [`azstore_core::ErrorKind::MissingCredential`] when `config` can't
    /// identify an account the service accepts.
    pub fn new(ctx: Context, kind: ClientKind, config: &Config) -> Result<Self> {
        let params = ServiceParameters::resolve(kind.service_type(), config)?;

        Ok(Self {
            kind,
            params,
            ctx,
            hooks: Hooks::default(),
            signer: Arc::new(RequestSigner::new()),
        })
    }

    /// Replace the signer used to authorize requests.
    pub fn with_signer(mut self, signer: impl SignRequest<Credential = Credential>) -> Self {
        self.signer = Arc::new(signer);
        self
    }

    /// Install a hook that may rewrite every request before it is signed.
    pub fn with_request_hook(
        mut self,
        hook: impl Fn(&mut http::request::Parts) + Send + Sync + 'static,
    ) -> Self {
        self.hooks.on_request = Some(Arc::new(hook));
        self
    }

    /// Install a hook that may rewrite every response before its status is checked.
    pub fn with_response_hook(
        mut self,
        hook: impl Fn(&mut http::response::Parts) + Send + Sync + 'static,
    ) -> Self {
        self.hooks.on_response = Some(Arc::new(hook));
        self
    }

    /// Client variant.
    pub fn kind(&self) -> ClientKind {
        self.kind
    }

    /// Service this client talks to.
    pub fn service_type(&self) -> ServiceType {
        self.params.service()
    }

    /// Resolved parameters.
    pub fn parameters(&self) -> &ServiceParameters {
        &self.params
    }

    /// Account name.
    pub fn account_name(&self) -> Option<&str> {
        self.params.account_name()
    }

    /// Account key.
    pub fn account_key(&self) -> Option<&str> {
        self.params.account_key()
    }

    /// SAS token.
    pub fn sas_token(&self) -> Option<&str> {
        self.params.sas_token()
    }

    /// Protocol.
    pub fn protocol(&self) -> Protocol {
        self.params.protocol()
    }

    /// Primary endpoint.
    pub fn primary_endpoint(&self) -> &str {
        self.params.primary_endpoint()
    }

    /// Secondary endpoint.
    pub fn secondary_endpoint(&self) -> Option<&str> {
        self.params.secondary_endpoint()
    }

    /// Active credential, `None` for anonymous clients.
    pub fn credential(&self) -> Option<Credential> {
        self.params.credential()
    }

    /// Runs one request through the hook, sign and send pipeline.
    ///
    /// The returned response has already passed the response hook, its status
    /// is left for the caller to interpret.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<http::Response<Bytes>> {
        let mut url = format!(
            "{}://{}/{}",
            self.params.protocol(),
            self.params.primary_endpoint(),
            path.trim_start_matches('/')
        );
        if !query.is_empty() {
            url.push('?');
            url.push_str(
                &form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(query)
                    .finish(),
            );
        }

        let req = http::Request::builder()
            .method(method)
            .uri(url)
            .header(X_MS_VERSION, AZURE_VERSION)
            .body(Bytes::new())?;
        let (mut parts, body) = req.into_parts();

        self.hooks.run_request(&mut parts);
        let credential = self.params.credential();
        self.signer
            .sign_request(&self.ctx, &mut parts, credential.as_ref())
            .await?;

        debug!("sending storage request: {} {}", parts.method, parts.uri.path());
        let resp = self
            .ctx
            .http_send(http::Request::from_parts(parts, body))
            .await?;

        let (mut parts, body) = resp.into_parts();
        self.hooks.run_response(&mut parts);
        debug!("got storage response: {}", parts.status);

        Ok(http::Response::from_parts(parts, body))
    }
}
