use std::fmt;
use tracing::warn;

const PUBLIC_KEY_PREFIX: &str = "pkey_";
const SECRET_KEY_PREFIX: &str = "skey_";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublicKeyError {
    #[error("public key is empty")]
    Empty,
    #[error("a secret key must never be used by a client")]
    SecretKey,
}

/// The publishable key that authenticates every request.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(String);

impl PublicKey {
    pub fn new(key: impl Into<String>) -> Result<Self, PublicKeyError> {
        let key = key.into();
        if key.is_empty() {
            return Err(PublicKeyError::Empty);
        }
        if key.starts_with(SECRET_KEY_PREFIX) {
            return Err(PublicKeyError::SecretKey);
        }
        if !key.starts_with(PUBLIC_KEY_PREFIX) {
            warn!("Public key does not start with `{PUBLIC_KEY_PREFIX}`");
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Basic` credentials: the key alone, base64 encoded, without a colon.
    pub fn authorization_header(&self) -> String {
        format!(
            "Basic {}",
            fast32::base64::RFC4648.encode(self.0.as_bytes())
        )
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.0.chars().take(PUBLIC_KEY_PREFIX.len() + 5).collect();
        write!(f, "PublicKey({visible}…)")
    }
}

impl TryFrom<String> for PublicKey {
    type Error = PublicKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PublicKey::new(value)
    }
}
