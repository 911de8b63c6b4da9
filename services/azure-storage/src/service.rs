use std::fmt::{Display, Formatter};

/// Azure Storage service a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    /// Blob storage.
    Blob,
    /// Queue storage.
    Queue,
    /// Table storage.
    Table,
    /// File shares.
    File,
}

impl ServiceType {
    /// All service types.
    pub const ALL: [ServiceType; 4] = [
        ServiceType::Blob,
        ServiceType::Queue,
        ServiceType::Table,
        ServiceType::File,
    ];

    /// Subdomain segment used in endpoint hostnames.
    pub fn endpoint_name(&self) -> &'static str {
        match self {
            ServiceType::Blob => "blob",
            ServiceType::Queue => "queue",
            ServiceType::Table => "table",
            ServiceType::File => "file",
        }
    }

    /// Connection string key that overrides the primary endpoint of this service.
    pub fn endpoint_key(&self) -> &'static str {
        match self {
            ServiceType::Blob => "BlobEndpoint",
            ServiceType::Queue => "QueueEndpoint",
            ServiceType::Table => "TableEndpoint",
            ServiceType::File => "FileEndpoint",
        }
    }

    /// Local port of the storage emulator, `None` if the service isn't emulated.
    pub fn emulator_port(&self) -> Option<u16> {
        match self {
            ServiceType::Blob => Some(10000),
            ServiceType::Queue => Some(10001),
            ServiceType::Table => Some(10002),
            ServiceType::File => None,
        }
    }

    /// Whether clients of this service may be anonymous.
    ///
    /// Only blob containers can be opened for public read access.
    pub fn allows_anonymous(&self) -> bool {
        matches!(self, ServiceType::Blob)
    }
}

impl Display for ServiceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.endpoint_name())
    }
}

/// Concrete client variants.
///
/// The blob variants differ only in the operations they expose; endpoint
/// and credential resolution depend on [`ServiceType`] alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientKind {
    /// Block blob client.
    BlockBlob,
    /// Page blob client.
    PageBlob,
    /// Append blob client.
    AppendBlob,
    /// Queue client.
    Queue,
    /// Table client.
    Table,
    /// File share client.
    File,
}

impl ClientKind {
    /// All client kinds.
    pub const ALL: [ClientKind; 6] = [
        ClientKind::BlockBlob,
        ClientKind::PageBlob,
        ClientKind::AppendBlob,
        ClientKind::Queue,
        ClientKind::Table,
        ClientKind::File,
    ];

    /// Blob client kinds.
    pub const BLOBS: [ClientKind; 3] = [
        ClientKind::BlockBlob,
        ClientKind::PageBlob,
        ClientKind::AppendBlob,
    ];

    /// Service type this client kind resolves against.
    pub fn service_type(&self) -> ServiceType {
        match self {
            ClientKind::BlockBlob | ClientKind::PageBlob | ClientKind::AppendBlob => {
                ServiceType::Blob
            }
            ClientKind::Queue => ServiceType::Queue,
            ClientKind::Table => ServiceType::Table,
            ClientKind::File => ServiceType::File,
        }
    }
}
