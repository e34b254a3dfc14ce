//! Push endpoint derivation
//!
//! The push endpoint lives on the same host as the portal page, with the
//! scheme upgraded to the real-time equivalent: `http` -> `ws`,
//! `https` -> `wss`. A page served securely therefore always gets a secure
//! push channel.

use crate::PushError;
use url::Url;

/// Derive the push endpoint from the portal origin
///
/// `path` replaces the origin's path; query and fragment are cleared.
pub fn push_endpoint(origin: &Url, path: &str) -> Result<Url, PushError> {
    let scheme = match origin.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(PushError::invalid_endpoint(format!(
                "unsupported origin scheme '{}'",
                other
            )))
        }
    };

    let mut endpoint = origin.clone();
    endpoint
        .set_scheme(scheme)
        .map_err(|_| PushError::invalid_endpoint(format!("cannot apply scheme '{}'", scheme)))?;
    endpoint.set_path(path);
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    Ok(endpoint)
}
