//! `Authorization: Basic` header parsing (RFC 7617).

use base64::prelude::*;

/// Username and password decoded from a Basic authorization header.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicAuthError {
    /// The header does not use the `Basic` scheme.
    WrongScheme,
    /// The payload is not base64 or not UTF-8.
    BadEncoding,
    /// The decoded payload has no `:` separator.
    MissingSeparator,
}

impl BasicAuthError {
    pub fn message(self) -> &'static str {
        match self {
            Self::WrongScheme => "Authorization header must use the Basic scheme",
            Self::BadEncoding => "Basic credentials are not valid base64",
            Self::MissingSeparator => "Basic credentials must be in the form username:password",
        }
    }
}

/// Parse the value of an `Authorization` header.
///
/// The scheme name is matched case-insensitively. The password is everything
/// after the first `:`, so it may itself contain colons.
pub fn parse_basic_auth_header(header: &str) -> Result<BasicCredentials, BasicAuthError> {
    let (scheme, encoded) = header
        .trim()
        .split_once(' ')
        .ok_or(BasicAuthError::WrongScheme)?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(BasicAuthError::WrongScheme);
    }

    let decoded = BASE64_STANDARD
        .decode(encoded.trim())
        .map_err(|_| BasicAuthError::BadEncoding)?;
    let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::BadEncoding)?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(BasicAuthError::MissingSeparator)?;

    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Build a header value for the given credentials.
pub fn encode_basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", BASE64_STANDARD.encode(format!("{username}:{password}")))
}
