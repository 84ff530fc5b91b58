use crate::metadata::Metadata;
use crate::timestamp::TimestampError;
use crate::KeyMetadata;
use jiff::Timestamp;

/// Private half of an authorized key, able to sign updates
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SigningKey<C> {
    #[serde(with = "signing_key_serde")]
    pub(crate) secret_key: libsignify::PrivateKey,
    #[serde(flatten)]
    pub(crate) metadata: Metadata<C>,
}

impl<C: std::fmt::Debug> std::fmt::Debug for SigningKey<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("key_id", &self.key_id())
            .field("secret_key", &"<secret>")
            .field("metadata", &self.metadata)
            .finish()
    }
}

mod signing_key_serde {
    use libsignify::{Codeable, PrivateKey};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(key: &PrivateKey, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(key.as_bytes()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<PrivateKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key_in_hex = String::deserialize(deserializer)?;
        let key_in_bytes = hex::decode(key_in_hex).map_err(serde::de::Error::custom)?;
        PrivateKey::from_bytes(&key_in_bytes).map_err(serde::de::Error::custom)
    }
}

impl<C> KeyMetadata for SigningKey<C> {
    fn key_id(&self) -> u32 {
        crate::key::key_id(&self.secret_key.public().keynum())
    }

    fn created_at(&self) -> Timestamp {
        self.metadata.created_at
    }

    fn expired_at(&self) -> Option<Timestamp> {
        self.metadata.expired_at
    }
}

impl<C> SigningKey<C> {
    pub fn comment(&self) -> Option<&C> {
        self.metadata.comment.as_ref()
    }

    pub fn with_comment(mut self, comment: C) -> Self {
        self.metadata = self.metadata.with_comment(comment);
        self
    }

    /// Set when the key stops being trusted, in seconds since the unix epoch
    pub fn with_expiration(mut self, timestamp: i64) -> Result<Self, TimestampError> {
        self.metadata = self.metadata.with_expiration(timestamp)?;
        Ok(self)
    }
}

#[cfg(feature = "generate")]
impl<C> SigningKey<C> {
    pub fn generate() -> Self {
        let mut rng = rand_core::OsRng {};
        let secret_key =
            libsignify::PrivateKey::generate(&mut rng, libsignify::NewKeyOpts::NoEncryption)
                .expect("private key without encryption");

        Self {
            secret_key,
            metadata: Default::default(),
        }
    }
}
