//! Verification of Slack's `v0` request signatures.
//!
//! The signed payload is `v0:{timestamp}:{raw body}`, keyed with the app's
//! signing secret; the header carries `v0=` followed by the hex digest.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const VERSION: &str = "v0";
const MAX_SKEW_SECS: i64 = 60 * 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("missing signature headers")]
    MissingHeaders,
    #[error("malformed request timestamp")]
    BadTimestamp,
    #[error("request timestamp outside the accepted window")]
    Stale,
    #[error("signature mismatch")]
    Mismatch,
    #[error("signing secret rejected")]
    InvalidSecret,
}

#[derive(Clone)]
pub struct SlackSignatureVerifier {
    keyed: HmacSha256,
}

impl SlackSignatureVerifier {
    pub fn new(secret: &str) -> Result<Self, SignatureError> {
        let keyed = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| SignatureError::InvalidSecret)?;
        Ok(Self { keyed })
    }

    fn mac(&self, timestamp: &str, body: &[u8]) -> HmacSha256 {
        let mut mac = self.keyed.clone();
        mac.update(VERSION.as_bytes());
        mac.update(b":");
        mac.update(timestamp.as_bytes());
        mac.update(b":");
        mac.update(body);
        mac
    }

    /// Header value Slack would send for this body, used by tests and tooling.
    pub fn sign(&self, timestamp: &str, body: &[u8]) -> String {
        let digest = self.mac(timestamp, body).finalize().into_bytes();
        format!("{VERSION}={}", hex::encode(digest))
    }

    pub fn verify(
        &self,
        timestamp: Option<&str>,
        signature: Option<&str>,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> Result<(), SignatureError> {
        let (Some(timestamp), Some(signature)) = (timestamp, signature) else {
            return Err(SignatureError::MissingHeaders);
        };

        let sent_at: i64 = timestamp
            .trim()
            .parse()
            .map_err(|_| SignatureError::BadTimestamp)?;
        if (now.timestamp() - sent_at).abs() > MAX_SKEW_SECS {
            return Err(SignatureError::Stale);
        }

        let provided = signature
            .strip_prefix("v0=")
            .and_then(|digest| hex::decode(digest).ok())
            .ok_or(SignatureError::Mismatch)?;

        self.mac(timestamp, body)
            .verify_slice(&provided)
            .map_err(|_| SignatureError::Mismatch)
    }
}
