//! Rule-list providers: the fetch seam between the merge engine and
//! the network.

mod http;

pub use http::HttpFetcher;

use async_trait::async_trait;

use crate::error::RulesError;

/// Fetch collaborator: given a URL, return the raw list body.
///
/// The engine treats this as opaque — no retries, no redirect handling
/// beyond what the implementation provides. Test doubles implement it
/// over in-memory maps.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, RulesError>;
}
