// Headers used in azure services.
pub const X_MS_VERSION: &str = "x-ms-version";
pub const X_MS_META_PREFIX: &str = "x-ms-meta-";

pub const AZURE_VERSION: &str = "2017-04-17";

/// Host suffix of the Azure public cloud.
pub const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

// Development storage (emulator) identity.
pub const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";
pub const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
pub const DEV_HOST: &str = "127.0.0.1";

pub const MISSING_INFO_MESSAGE: &str = "You need to provide an account name and either an account_key or sas_token when creating a storage service.";

// Connection string keys.
pub const CS_ACCOUNT_NAME: &str = "AccountName";
pub const CS_ACCOUNT_KEY: &str = "AccountKey";
pub const CS_SHARED_ACCESS_SIGNATURE: &str = "SharedAccessSignature";
pub const CS_DEFAULT_ENDPOINTS_PROTOCOL: &str = "DefaultEndpointsProtocol";
pub const CS_ENDPOINT_SUFFIX: &str = "EndpointSuffix";
pub const CS_USE_DEVELOPMENT_STORAGE: &str = "UseDevelopmentStorage";

// Env values used to configure clients.
pub const AZURE_STORAGE_CONNECTION_STRING: &str = "AZURE_STORAGE_CONNECTION_STRING";
pub const AZURE_STORAGE_ACCOUNT: &str = "AZURE_STORAGE_ACCOUNT";
pub const AZURE_STORAGE_KEY: &str = "AZURE_STORAGE_KEY";
pub const AZURE_STORAGE_SAS_TOKEN: &str = "AZURE_STORAGE_SAS_TOKEN";
pub const AZBLOB_ACCOUNT_NAME: &str = "AZBLOB_ACCOUNT_NAME";
pub const AZBLOB_ACCOUNT_KEY: &str = "AZBLOB_ACCOUNT_KEY";
pub const AZBLOB_ENDPOINT: &str = "AZBLOB_ENDPOINT";
