use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Called with every request before it is signed and sent.
pub type RequestHook = Arc<dyn Fn(&mut http::request::Parts) + Send + Sync>;

/// Called with every response before the client checks its status.
pub type ResponseHook = Arc<dyn Fn(&mut http::response::Parts) + Send + Sync>;

/// Hook slots of a service client.
///
/// Hooks run synchronously on the task that issues the request. A client
/// shared across tasks calls the same hook concurrently.
#[derive(Clone, Default)]
pub(crate) struct Hooks {
    pub(crate) on_request: Option<RequestHook>,
    pub(crate) on_response: Option<ResponseHook>,
}

impl Hooks {
    pub(crate) fn run_request(&self, req: &mut http::request::Parts) {
        if let Some(hook) = &self.on_request {
            hook(req);
        }
    }

    pub(crate) fn run_response(&self, resp: &mut http::response::Parts) {
        if let Some(hook) = &self.on_response {
            hook(resp);
        }
    }
}

impl Debug for Hooks {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("on_request", &self.on_request.is_some())
            .field("on_response", &self.on_response.is_some())
            .finish()
    }
}
