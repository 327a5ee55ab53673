//! Authentication capabilities derived from security schemes.
//!
//! The model builds one [`OAuth2Client`] per scheme whose `type` is exactly
//! `"OAuth 2.0"`, retrievable by scheme name via
//! [`RamlModel::security_authentication`]. The OAuth2 protocol flows
//! themselves are out of scope — the client carries endpoint configuration
//! and mints [`RequestSigner`] tokens from access tokens obtained out of
//! band.
//!
//! [`RamlModel::security_authentication`]: crate::model::RamlModel::security_authentication

mod oauth2;

pub use oauth2::{OAuth2Client, OAuth2Token};

use indexmap::IndexMap;

use crate::raml::SecurityScheme;
use crate::transport::TransportRequest;

/// Scheme `type` value that produces an [`OAuth2Client`].
const OAUTH2_SCHEME_TYPE: &str = "OAuth 2.0";

/// Capability that mutates an outgoing request with credentials before
/// dispatch.
pub trait RequestSigner: Send + Sync {
    fn sign(&self, request: &mut TransportRequest);
}

/// Build authentication clients for every OAuth 2.0 scheme in the registry.
/// Schemes of other types produce nothing through this path.
pub fn build_authentication(
    schemes: &IndexMap<String, SecurityScheme>,
) -> IndexMap<String, OAuth2Client> {
    let mut clients = IndexMap::new();
    for (name, scheme) in schemes {
        if scheme.scheme_type.as_deref() == Some(OAUTH2_SCHEME_TYPE) {
            clients.insert(name.clone(), OAuth2Client::from_settings(&scheme.settings));
        }
    }
    clients
}
