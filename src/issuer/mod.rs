//! Issuer module
//!
//! Requests short-lived link tokens from the vendor's token issuance API.

pub mod credentials;
pub mod error;
pub mod link_token;

use std::future::Future;

pub use error::{IssuanceError, VendorError};
pub use link_token::{build_client, ClientUserId, LinkToken, LinkTokenIssuer};

/// Seam between the HTTP facade and the vendor call.
pub trait IssueLinkToken: Send + Sync + 'static {
    fn issue_token(
        &self,
        user: &ClientUserId,
    ) -> impl Future<Output = Result<LinkToken, IssuanceError>> + Send;
}
