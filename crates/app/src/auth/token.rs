//! API token formatting, parsing, and verifier construction.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::{auth::models::ApiTokenUuid, domain::accounts::records::UserUuid};

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "mk";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

const API_TOKEN_SECRET_HEX_CHARS: usize = API_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for ApiTokenVersion {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

/// Raw secret half of a bearer token. Zeroed on drop, never printed.
#[derive(Clone)]
pub struct ApiTokenSecret([u8; API_TOKEN_SECRET_BYTES]);

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self(bytes)
    }

    /// Draw a fresh secret from the operating system RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self(bytes)
    }

    fn to_hex(&self) -> String {
        const HEX: &[u8; 16] = b"0123456789abcdef";

        let mut encoded = String::with_capacity(API_TOKEN_SECRET_HEX_CHARS);

        for byte in &self.0 {
            encoded.push(char::from(HEX[usize::from(byte >> 4)]));
            encoded.push(char::from(HEX[usize::from(byte & 0x0f)]));
        }

        encoded
    }

    fn from_hex(encoded: &str) -> Option<Self> {
        if encoded.len() != API_TOKEN_SECRET_HEX_CHARS
            || !encoded.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return None;
        }

        let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

        for (byte, pair) in bytes.iter_mut().zip(encoded.as_bytes().chunks_exact(2)) {
            let pair = std::str::from_utf8(pair).ok()?;

            *byte = u8::from_str_radix(pair, 16).ok()?;
        }

        Some(Self(bytes))
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A bearer token split into its parts.
#[derive(Debug, Clone)]
pub struct ParsedApiToken {
    pub token_uuid: ApiTokenUuid,
    pub version: ApiTokenVersion,
    pub secret: ApiTokenSecret,
}

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

/// Render a bearer token: `mk_v1_<token uuid>.<secret hex>`.
#[must_use]
pub fn format_api_token(
    token_uuid: ApiTokenUuid,
    version: ApiTokenVersion,
    secret: &ApiTokenSecret,
) -> String {
    format!(
        "{API_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        token_uuid.into_uuid().simple(),
        secret.to_hex()
    )
}

/// Split a bearer token into id, version and secret.
///
/// # Errors
///
/// Returns an error when the prefix, version, id or secret is malformed.
pub fn parse_api_token(token: &str) -> Result<ParsedApiToken, ApiTokenError> {
    let (id, secret_hex) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

    let mut parts = id.splitn(3, '_');

    let (Some(prefix), Some(version), Some(token_uuid)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ApiTokenError::InvalidFormat);
    };

    if prefix != API_TOKEN_PREFIX {
        return Err(ApiTokenError::InvalidFormat);
    }

    let version = version.parse::<ApiTokenVersion>()?;

    let token_uuid = Uuid::try_parse(token_uuid).map_err(|_| ApiTokenError::InvalidFormat)?;

    let secret =
        ApiTokenSecret::from_hex(secret_hex).ok_or(ApiTokenError::InvalidSecretEncoding)?;

    Ok(ParsedApiToken {
        token_uuid: ApiTokenUuid::from_uuid(token_uuid),
        version,
        secret,
    })
}

/// Hex SHA-256 of `{token uuid}:{version}:{user uuid}:{secret hex}`.
///
/// Binding the owner into the digest means a stored hash copied onto another
/// user's row never verifies.
#[must_use]
pub fn token_verifier(
    token_uuid: ApiTokenUuid,
    version: ApiTokenVersion,
    user_uuid: UserUuid,
    secret: &ApiTokenSecret,
) -> String {
    let mut input = format!(
        "{}:{}:{}:{}",
        token_uuid.into_uuid().simple(),
        version.as_i16(),
        user_uuid.into_uuid().simple(),
        secret.to_hex(),
    );

    let digest = format!("{:x}", Sha256::digest(input.as_bytes()));

    input.zeroize();

    digest
}

/// Compare two verifiers without short-circuiting on the first differing byte.
#[must_use]
pub fn verifiers_match(expected: &str, actual: &str) -> bool {
    expected.len() == actual.len()
        && expected
            .bytes()
            .zip(actual.bytes())
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}
