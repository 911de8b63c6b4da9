use crate::{Context, Result};
use std::fmt::Debug;

/// SignRequest is the trait a client calls to authorize an outgoing request.
///
/// Services hold different credentials: an account key has to be turned into
/// a signature, while a pre-signed token only needs to be attached.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: Send + Sync + Unpin + 'static;

    /// Authorize the request in place.
    ///
    /// ## Credential
    ///
    /// `None` means the client is anonymous. Signers should leave the request
    /// untouched in that case unless they require a credential.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()>;
}
