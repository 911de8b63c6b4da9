use std::fmt::{Debug, Formatter};

use azstore_core::utils::Redact;
use azstore_core::{Context, Result};

use crate::constants::*;
use crate::{connection_string, Protocol, ServiceType};

/// Config carries the construction inputs of a storage service client.
///
/// Every field is optional. When `connection_string` is set it drives
/// resolution alone and the other fields are ignored.
#[derive(Clone, Default, PartialEq)]
pub struct Config {
    /// Storage account name.
    pub account_name: Option<String>,
    /// Symmetric account key. Empty keys count as absent.
    pub account_key: Option<String>,
    /// Pre-signed shared access signature, kept verbatim.
    pub sas_token: Option<String>,
    /// Use the local development storage identity instead of a real account.
    pub is_emulated: bool,
    /// Protocol, `https` if unset.
    pub protocol: Option<Protocol>,
    /// Host suffix, `core.windows.net` if unset.
    pub endpoint_suffix: Option<String>,
    /// Replaces the computed primary endpoint.
    ///
    /// A leading `http://` or `https://` sets the protocol and is stripped.
    pub custom_domain: Option<String>,
    /// Connection string that takes precedence over every other field.
    pub connection_string: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("account_name", &self.account_name)
            .field("account_key", &Redact::from(&self.account_key))
            .field("sas_token", &Redact::from(&self.sas_token))
            .field("is_emulated", &self.is_emulated)
            .field("protocol", &self.protocol)
            .field("endpoint_suffix", &self.endpoint_suffix)
            .field("custom_domain", &self.custom_domain)
            .field("connection_string", &Redact::from(&self.connection_string))
            .finish()
    }
}

impl Config {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the account name.
    pub fn with_account_name(mut self, account_name: impl Into<String>) -> Self {
        self.account_name = Some(account_name.into());
        self
    }

    /// Set the account key.
    pub fn with_account_key(mut self, account_key: impl Into<String>) -> Self {
        self.account_key = Some(account_key.into());
        self
    }

    /// Set the SAS token.
    pub fn with_sas_token(mut self, sas_token: impl Into<String>) -> Self {
        self.sas_token = Some(sas_token.into());
        self
    }

    /// Use the development storage emulator.
    pub fn with_emulator(mut self) -> Self {
        self.is_emulated = true;
        self
    }

    /// Set the protocol.
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    /// Set the endpoint suffix, for example `core.chinacloudapi.cn`.
    pub fn with_endpoint_suffix(mut self, endpoint_suffix: impl Into<String>) -> Self {
        self.endpoint_suffix = Some(endpoint_suffix.into());
        self
    }

    /// Set a custom domain for the primary endpoint.
    pub fn with_custom_domain(mut self, custom_domain: impl Into<String>) -> Self {
        self.custom_domain = Some(custom_domain.into());
        self
    }

    /// Set a connection string.
    pub fn with_connection_string(mut self, connection_string: impl Into<String>) -> Self {
        self.connection_string = Some(connection_string.into());
        self
    }

    /// Load config from env.
    ///
    /// Variables found in the environment overwrite the matching field:
    ///
    /// - `AZURE_STORAGE_CONNECTION_STRING` → `connection_string`
    /// - `AZURE_STORAGE_ACCOUNT` or `AZBLOB_ACCOUNT_NAME` → `account_name`
    /// - `AZURE_STORAGE_KEY` or `AZBLOB_ACCOUNT_KEY` → `account_key`
    /// - `AZURE_STORAGE_SAS_TOKEN` → `sas_token`
    /// - `AZBLOB_ENDPOINT` → `custom_domain`
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(AZURE_STORAGE_CONNECTION_STRING) {
            self.connection_string = Some(v);
        }

        if let Some(v) = ctx
            .env_var(AZURE_STORAGE_ACCOUNT)
            .or_else(|| ctx.env_var(AZBLOB_ACCOUNT_NAME))
        {
            self.account_name = Some(v);
        }

        if let Some(v) = ctx
            .env_var(AZURE_STORAGE_KEY)
            .or_else(|| ctx.env_var(AZBLOB_ACCOUNT_KEY))
        {
            self.account_key = Some(v);
        }

        if let Some(v) = ctx.env_var(AZURE_STORAGE_SAS_TOKEN) {
            self.sas_token = Some(v);
        }

        if let Some(v) = ctx.env_var(AZBLOB_ENDPOINT) {
            self.custom_domain = Some(v);
        }

        self
    }

    /// Parses an [Azure connection string][1] into a configuration object.
    ///
    /// The service type decides which `*Endpoint` key is read as the custom
    /// domain. Parsing is lenient: segments without `=` and unknown keys are
    /// skipped, and an unknown `DefaultEndpointsProtocol` is ignored. An example of a connection string looks like:
    ///
    /// ```txt
    /// AccountName=mystorageaccount;
    /// AccountKey=Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==;
    /// BlobEndpoint=https://mystorageaccount.blob.core.windows.net
    /// ```
    ///
    /// [1]: https://learn.microsoft.com/en-us/azure/storage/common/storage-configure-connection-string
    pub fn try_from_connection_string(conn_str: &str, service: ServiceType) -> Result<Self> {
        connection_string::parse(conn_str, service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azstore_core::StaticEnv;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env_ctx(pairs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test]
    fn test_from_env() {
        let ctx = env_ctx(&[
            (AZURE_STORAGE_ACCOUNT, "myaccount"),
            (AZURE_STORAGE_KEY, "mykey"),
            (AZURE_STORAGE_SAS_TOKEN, "sv=2017-04-17&sig=abc"),
        ]);

        let config = Config::new().from_env(&ctx);
        assert_eq!(
            config,
            Config {
                account_name: Some("myaccount".to_string()),
                account_key: Some("mykey".to_string()),
                sas_token: Some("sv=2017-04-17&sig=abc".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_from_env_azblob_names() {
        let ctx = env_ctx(&[
            (AZBLOB_ACCOUNT_NAME, "blobaccount"),
            (AZBLOB_ACCOUNT_KEY, "blobkey"),
            (AZBLOB_ENDPOINT, "www.mydomain.com"),
        ]);

        let config = Config::new().from_env(&ctx);
        assert_eq!(config.account_name.as_deref(), Some("blobaccount"));
        assert_eq!(config.account_key.as_deref(), Some("blobkey"));
        assert_eq!(config.custom_domain.as_deref(), Some("www.mydomain.com"));
    }

    #[test]
    fn test_from_env_prefers_azure_storage_names() {
        let ctx = env_ctx(&[
            (AZURE_STORAGE_ACCOUNT, "storageaccount"),
            (AZBLOB_ACCOUNT_NAME, "blobaccount"),
            (AZBLOB_ACCOUNT_KEY, "blobkey"),
        ]);

        let config = Config::new().from_env(&ctx);
        assert_eq!(config.account_name.as_deref(), Some("storageaccount"));
        assert_eq!(config.account_key.as_deref(), Some("blobkey"));
    }

    #[test]
    fn test_from_env_keeps_unset_fields() {
        let ctx = env_ctx(&[(AZURE_STORAGE_CONNECTION_STRING, "UseDevelopmentStorage=true")]);

        let config = Config::new()
            .with_account_name("explicit")
            .with_protocol(Protocol::Http)
            .from_env(&ctx);
        assert_eq!(config.account_name.as_deref(), Some("explicit"));
        assert_eq!(config.protocol, Some(Protocol::Http));
        assert_eq!(
            config.connection_string.as_deref(),
            Some("UseDevelopmentStorage=true")
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new()
            .with_account_name("myaccount")
            .with_account_key("Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==");

        let output = format!("{config:?}");
        assert!(output.contains("myaccount"));
        assert!(output.contains("Eby***w=="));
        assert!(!output.contains("Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq"));
    }
}
