//! Request builder: merged parameters → absolute request URL.

use url::form_urlencoded;

use crate::endpoint::Descriptor;
use crate::error::QueryError;
use crate::params::Params;

/// Origin used when the client is not pointed elsewhere.
pub const DEFAULT_BASE_URL: &str = "https://api.wolframalpha.com/";

const API_VERSIONS: [(u8, &str); 2] = [(1, "v1/"), (2, "v2/")];

/// Path segment for an API version, e.g. `2` → `"v2/"`.
pub fn api_version_path(version: u8) -> Result<&'static str, QueryError> {
    API_VERSIONS
        .iter()
        .find(|(v, _)| *v == version)
        .map(|(_, path)| *path)
        .ok_or(QueryError::UnsupportedVersion(version))
}

/// Form-encode `params` in insertion order. Spaces become `+`, reserved
/// characters such as `+` and `,` are percent-encoded.
pub fn encode_query(params: &Params) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.to_pairs())
        .finish()
}

/// `<base_url><version path><endpoint path>?<query>`.
///
/// `base_url` is expected to end with `/`.
pub fn build_url(base_url: &str, descriptor: &Descriptor, params: &Params) -> Result<String, QueryError> {
    let version = api_version_path(descriptor.version)?;
    Ok(format!(
        "{base_url}{version}{}?{}",
        descriptor.path,
        encode_query(params)
    ))
}

/// Append `params` to a provider-issued continuation URL, used verbatim.
pub fn build_continuation_url(continuation_url: &str, params: &Params) -> String {
    let separator = if continuation_url.contains('?') { '&' } else { '?' };
    format!("{continuation_url}{separator}{}", encode_query(params))
}
