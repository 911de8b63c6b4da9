use std::fmt::{Debug, Formatter};

use azstore_core::utils::Redact;
use azstore_core::{Error, Result};
use log::{debug, warn};

use crate::constants::*;
use crate::protocol::split_scheme;
use crate::{Config, Credential, Protocol, ServiceType};

/// Resolved identity and location of one service client.
///
/// Built once from a [`Config`] and never changed afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceParameters {
    service: ServiceType,
    account_name: Option<String>,
    account_key: Option<String>,
    sas_token: Option<String>,
    protocol: Protocol,
    endpoint_suffix: String,
    primary_endpoint: String,
    secondary_endpoint: Option<String>,
    is_emulated: bool,
}

impl Debug for ServiceParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceParameters")
            .field("service", &self.service)
            .field("account_name", &self.account_name)
            .field("account_key", &Redact::from(&self.account_key))
            .field("sas_token", &Redact::from(&self.sas_token))
            .field("protocol", &self.protocol)
            .field("endpoint_suffix", &self.endpoint_suffix)
            .field("primary_endpoint", &self.primary_endpoint)
            .field("secondary_endpoint", &self.secondary_endpoint)
            .field("is_emulated", &self.is_emulated)
            .finish()
    }
}

impl ServiceParameters {
    /// Resolve the parameters of a `service` client.
    ///
    /// A connection string in `config` takes precedence and every other field
    /// of `config` is ignored. Otherwise the direct fields are used.
    pub fn resolve(service: ServiceType, config: &Config) -> Result<Self> {
        let params = match &config.connection_string {
            Some(conn_str) => {
                let parsed = Config::try_from_connection_string(conn_str, service)?;
                Self::from_config(service, &parsed)?
            }
            None => Self::from_config(service, config)?,
        };

        debug!("resolved storage service parameters: {params:?}");
        Ok(params)
    }

    fn from_config(service: ServiceType, config: &Config) -> Result<Self> {
        if config.is_emulated {
            return Self::emulated(service);
        }

        let account_name = non_empty(config.account_name.as_deref());
        let mut account_key = non_empty(config.account_key.as_deref().map(str::trim));
        let mut sas_token = non_empty(config.sas_token.as_deref());
        let custom_domain = non_empty(config.custom_domain.as_deref());

        let mut protocol = config.protocol.unwrap_or_default();
        let endpoint_suffix = non_empty(config.endpoint_suffix.as_deref())
            .unwrap_or_else(|| DEFAULT_ENDPOINT_SUFFIX.to_string());

        // Without an account name only an anonymous blob client can be addressed.
        if account_name.is_none() && (custom_domain.is_none() || !service.allows_anonymous()) {
            return Err(Error::missing_identity(MISSING_INFO_MESSAGE));
        }

        let primary_endpoint = match (&custom_domain, &account_name) {
            (Some(domain), _) => {
                let (scheme, host) = split_scheme(domain);
                if let Some(scheme) = scheme {
                    protocol = scheme;
                }
                host.strip_suffix('/').unwrap_or(host).to_string()
            }
            (None, Some(name)) => format!("{name}.{service}.{endpoint_suffix}"),
            (None, None) => return Err(Error::missing_identity(MISSING_INFO_MESSAGE)),
        };

        let secondary_endpoint = account_name
            .as_ref()
            .map(|name| format!("{name}-secondary.{service}.{endpoint_suffix}"));

        if account_name.is_none() && account_key.take().is_some() {
            debug!("dropping account key given without an account name");
        }

        if account_key.is_some() && sas_token.is_some() {
            warn!("both account key and sas token are given, using the account key");
            sas_token = None;
        }

        if account_key.is_none() && sas_token.is_none() && !service.allows_anonymous() {
            return Err(Error::missing_credential(MISSING_INFO_MESSAGE));
        }

        Ok(Self {
            service,
            account_name,
            account_key,
            sas_token,
            protocol,
            endpoint_suffix,
            primary_endpoint,
            secondary_endpoint,
            is_emulated: false,
        })
    }

    fn emulated(service: ServiceType) -> Result<Self> {
        let Some(port) = service.emulator_port() else {
            return Err(Error::config_invalid(format!(
                "development storage does not emulate the {service} service"
            )));
        };

        Ok(Self {
            service,
            account_name: Some(DEV_ACCOUNT_NAME.to_string()),
            account_key: Some(DEV_ACCOUNT_KEY.to_string()),
            sas_token: None,
            protocol: Protocol::Http,
            endpoint_suffix: DEFAULT_ENDPOINT_SUFFIX.to_string(),
            primary_endpoint: format!("{DEV_HOST}:{port}/{DEV_ACCOUNT_NAME}"),
            secondary_endpoint: Some(format!("{DEV_HOST}:{port}/{DEV_ACCOUNT_NAME}-secondary")),
            is_emulated: true,
        })
    }

    /// Service these parameters were resolved for.
    pub fn service(&self) -> ServiceType {
        self.service
    }

    /// Account name, `None` for clients addressed only by a custom domain.
    pub fn account_name(&self) -> Option<&str> {
        self.account_name.as_deref()
    }

    /// Account key, `None` unless shared key authorization is used.
    pub fn account_key(&self) -> Option<&str> {
        self.account_key.as_deref()
    }

    /// SAS token exactly as given.
    pub fn sas_token(&self) -> Option<&str> {
        self.sas_token.as_deref()
    }

    /// Protocol used to reach the endpoints.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Host suffix the standard endpoints are built from.
    pub fn endpoint_suffix(&self) -> &str {
        &self.endpoint_suffix
    }

    /// Primary endpoint without scheme.
    pub fn primary_endpoint(&self) -> &str {
        &self.primary_endpoint
    }

    /// Secondary endpoint without scheme, `None` when no account name is known.
    pub fn secondary_endpoint(&self) -> Option<&str> {
        self.secondary_endpoint.as_deref()
    }

    /// Whether these are the development storage parameters.
    pub fn is_emulated(&self) -> bool {
        self.is_emulated
    }

    /// Active credential, `None` for anonymous clients.
    pub fn credential(&self) -> Option<Credential> {
        match (&self.account_name, &self.account_key, &self.sas_token) {
            (Some(name), Some(key), _) => Some(Credential::with_shared_key(name, key)),
            (_, _, Some(token)) => Some(Credential::with_sas_token(token)),
            _ => None,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use azstore_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    const NAME: &str = "storagename";
    const KEY: &str = "NzhL3hKZbJBuJ2484dPTR+xF30kYaWSSCbs2BzLgVVI1woqeST/1IgqaLm6QAOTxtGvxctSNbIR/1hW8yH+bJg==";

    #[test_case(ServiceType::Blob)]
    #[test_case(ServiceType::Queue)]
    #[test_case(ServiceType::Table)]
    #[test_case(ServiceType::File)]
    fn test_resolve_with_key(service: ServiceType) {
        let config = Config::new().with_account_name(NAME).with_account_key(KEY);
        let params = ServiceParameters::resolve(service, &config).unwrap();

        assert_eq!(params.account_name(), Some(NAME));
        assert_eq!(params.account_key(), Some(KEY));
        assert_eq!(params.sas_token(), None);
        assert_eq!(params.protocol(), Protocol::Https);
        assert_eq!(
            params.primary_endpoint(),
            format!("{NAME}.{}.core.windows.net", service.endpoint_name())
        );
        assert_eq!(
            params.secondary_endpoint(),
            Some(format!("{NAME}-secondary.{}.core.windows.net", service.endpoint_name()).as_str())
        );
    }

    #[test]
    fn test_key_is_trimmed() {
        let config = Config::new()
            .with_account_name(NAME)
            .with_account_key(format!("  {KEY}\n"));
        let params = ServiceParameters::resolve(ServiceType::Queue, &config).unwrap();
        assert_eq!(params.account_key(), Some(KEY));
    }

    #[test_case(ServiceType::Queue)]
    #[test_case(ServiceType::Table)]
    #[test_case(ServiceType::File)]
    fn test_whitespace_key_is_missing(service: ServiceType) {
        let config = Config::new().with_account_name(NAME).with_account_key("   ");
        let err = ServiceParameters::resolve(service, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
        assert_eq!(err.to_string(), MISSING_INFO_MESSAGE);
    }

    #[test]
    fn test_key_wins_over_sas() {
        let config = Config::new()
            .with_account_name(NAME)
            .with_account_key(KEY)
            .with_sas_token("sv=2015-04-05&sig=abc");
        let params = ServiceParameters::resolve(ServiceType::Table, &config).unwrap();

        assert_eq!(params.account_key(), Some(KEY));
        assert_eq!(params.sas_token(), None);
        assert_eq!(params.credential(), Some(Credential::with_shared_key(NAME, KEY)));
    }

    #[test]
    fn test_custom_domain_with_scheme_sets_protocol() {
        let config = Config::new()
            .with_account_name(NAME)
            .with_account_key(KEY)
            .with_custom_domain("http://www.mydomain.com/");
        let params = ServiceParameters::resolve(ServiceType::Blob, &config).unwrap();

        assert_eq!(params.protocol(), Protocol::Http);
        assert_eq!(params.primary_endpoint(), "www.mydomain.com");
        assert_eq!(
            params.secondary_endpoint(),
            Some("storagename-secondary.blob.core.windows.net")
        );
    }

    #[test]
    fn test_custom_domain_removes_only_one_slash() {
        let config = Config::new().with_custom_domain("www.mydomain.com//");
        let params = ServiceParameters::resolve(ServiceType::Blob, &config).unwrap();
        assert_eq!(params.primary_endpoint(), "www.mydomain.com/");
    }

    #[test]
    fn test_custom_domain_with_unknown_scheme() {
        let config = Config::new()
            .with_protocol(Protocol::Http)
            .with_custom_domain("ftp://www.mydomain.com/");
        let params = ServiceParameters::resolve(ServiceType::Blob, &config).unwrap();
        assert_eq!(params.protocol(), Protocol::Http);
        assert_eq!(params.primary_endpoint(), "www.mydomain.com");
    }

    #[test]
    fn test_key_without_name_is_dropped() {
        let config = Config::new()
            .with_account_key(KEY)
            .with_custom_domain("www.mydomain.com");
        let params = ServiceParameters::resolve(ServiceType::Blob, &config).unwrap();

        assert_eq!(params.account_key(), None);
        assert_eq!(params.credential(), None);
        assert_eq!(params.secondary_endpoint(), None);
    }

    #[test_case(ServiceType::Queue)]
    #[test_case(ServiceType::Table)]
    #[test_case(ServiceType::File)]
    fn test_non_blob_custom_domain_with_sas(service: ServiceType) {
        let config = Config::new()
            .with_sas_token("sv=2015-04-05&sig=abc")
            .with_custom_domain("queue.mydomain.com");
        let err = ServiceParameters::resolve(service, &config).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MissingIdentity);
        assert!(err.is_argument_error());
        assert_eq!(err.to_string(), MISSING_INFO_MESSAGE);
    }

    #[test]
    fn test_non_blob_custom_domain_without_credential() {
        let config = Config::new().with_custom_domain("queue.mydomain.com");
        let err = ServiceParameters::resolve(ServiceType::Queue, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingIdentity);
    }

    #[test]
    fn test_empty_account_name_is_missing_identity() {
        let config = Config::new().with_account_name("").with_account_key(KEY);
        let err = ServiceParameters::resolve(ServiceType::Blob, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingIdentity);
    }

    #[test_case(ServiceType::Blob)]
    #[test_case(ServiceType::Queue)]
    #[test_case(ServiceType::Table)]
    fn test_emulated_ignores_other_inputs(service: ServiceType) {
        let config = Config {
            account_name: Some(NAME.to_string()),
            account_key: Some(KEY.to_string()),
            sas_token: Some("sv=2015-04-05&sig=abc".to_string()),
            protocol: Some(Protocol::Https),
            endpoint_suffix: Some("core.chinacloudapi.cn".to_string()),
            custom_domain: Some("www.mydomain.com".to_string()),
            is_emulated: true,
            connection_string: None,
        };
        let params = ServiceParameters::resolve(service, &config).unwrap();
        let port = service.emulator_port().unwrap();

        assert!(params.is_emulated());
        assert_eq!(params.account_name(), Some(DEV_ACCOUNT_NAME));
        assert_eq!(params.account_key(), Some(DEV_ACCOUNT_KEY));
        assert_eq!(params.sas_token(), None);
        assert_eq!(params.protocol(), Protocol::Http);
        assert_eq!(
            params.primary_endpoint(),
            format!("127.0.0.1:{port}/devstoreaccount1")
        );
        assert_eq!(
            params.secondary_endpoint(),
            Some(format!("127.0.0.1:{port}/devstoreaccount1-secondary").as_str())
        );
    }

    #[test]
    fn test_emulated_file_service() {
        let config = Config::new().with_emulator();
        let err = ServiceParameters::resolve(ServiceType::File, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_connection_string_ignores_direct_fields() {
        let config = Config::new()
            .with_account_name("ignored")
            .with_account_key("ignored")
            .with_protocol(Protocol::Http)
            .with_connection_string(format!("AccountName={NAME};AccountKey={KEY};"));
        let params = ServiceParameters::resolve(ServiceType::Blob, &config).unwrap();

        let direct = Config::new().with_account_name(NAME).with_account_key(KEY);
        assert_eq!(
            params,
            ServiceParameters::resolve(ServiceType::Blob, &direct).unwrap()
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config::new().with_account_name(NAME).with_account_key(KEY);
        let params = ServiceParameters::resolve(ServiceType::Blob, &config).unwrap();

        let output = format!("{params:?}");
        assert!(output.contains("Nzh***g=="));
        assert!(!output.contains(KEY));
    }
}
