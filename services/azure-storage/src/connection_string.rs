use std::collections::HashMap;

use azstore_core::Result;
use log::debug;

use crate::constants::*;
use crate::{Config, Protocol, ServiceType};

/// Parses an [Azure connection string][1] into the same inputs direct
/// parameters would provide.
///
/// Nothing here fails: values that can't be parsed are logged and left
/// unset, resolution runs later against the returned config.
///
/// [1]: https://learn.microsoft.com/en-us/azure/storage/common/storage-configure-connection-string
pub(crate) fn parse(conn_str: &str, service: ServiceType) -> Result<Config> {
    let mut key_values = parse_into_key_values(conn_str);

    // Development storage overrides every other key.
    if key_values
        .get(CS_USE_DEVELOPMENT_STORAGE)
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    {
        return Ok(Config {
            is_emulated: true,
            ..Default::default()
        });
    }

    let protocol = key_values
        .get(CS_DEFAULT_ENDPOINTS_PROTOCOL)
        .and_then(|v| match v.parse::<Protocol>() {
            Ok(protocol) => Some(protocol),
            Err(err) => {
                debug!("ignoring {CS_DEFAULT_ENDPOINTS_PROTOCOL}: {err}");
                None
            }
        });

    Ok(Config {
        account_name: key_values.remove(CS_ACCOUNT_NAME),
        account_key: key_values.remove(CS_ACCOUNT_KEY),
        sas_token: key_values.remove(CS_SHARED_ACCESS_SIGNATURE),
        is_emulated: false,
        protocol,
        endpoint_suffix: key_values.remove(CS_ENDPOINT_SUFFIX),
        custom_domain: key_values.remove(service.endpoint_key()),
        connection_string: None,
    })
}

/// Splits `key=value` pairs on `;`, keeping everything after the first `=`
/// as the value.
///
/// Segments without `=` are skipped instead of failing the whole string.
fn parse_into_key_values(conn_str: &str) -> HashMap<&str, String> {
    let mut key_values = HashMap::new();

    for field in conn_str.split(';').map(str::trim) {
        if field.is_empty() {
            continue;
        }

        match field.split_once('=') {
            Some((key, value)) => {
                key_values.insert(key.trim(), value.trim().to_string());
            }
            None => debug!("skipping connection string segment without '=': {field:?}"),
        }
    }

    key_values
}
