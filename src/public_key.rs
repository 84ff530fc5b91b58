use crate::metadata::Metadata;
use crate::{KeyMetadata, SigningKey};
use jiff::Timestamp;

/// Public half of a signing key, registered as trusted for a user
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct AuthorizedKey<C> {
    #[serde(with = "public_key_serde")]
    public_key: libsignify::PublicKey,
    #[serde(flatten)]
    metadata: Metadata<C>,
}

mod public_key_serde {
    use libsignify::{Codeable, PublicKey};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(key: &PublicKey, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(key.as_bytes()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<PublicKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key_in_hex = String::deserialize(deserializer)?;
        let key_in_bytes = hex::decode(key_in_hex).map_err(serde::de::Error::custom)?;
        PublicKey::from_bytes(&key_in_bytes).map_err(serde::de::Error::custom)
    }
}

impl<C> From<SigningKey<C>> for AuthorizedKey<C> {
    fn from(value: SigningKey<C>) -> Self {
        Self {
            public_key: value.secret_key.public(),
            metadata: value.metadata,
        }
    }
}

impl<C> KeyMetadata for AuthorizedKey<C> {
    fn key_id(&self) -> u32 {
        crate::key::key_id(&self.public_key.keynum())
    }

    fn created_at(&self) -> Timestamp {
        self.metadata.created_at
    }

    fn expired_at(&self) -> Option<Timestamp> {
        self.metadata.expired_at
    }
}

impl<C> AuthorizedKey<C> {
    pub fn comment(&self) -> Option<&C> {
        self.metadata.comment.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing_key::tests::FIXTURE_WITH_EXPIRATION;

    #[test]
    fn keeps_identity_and_metadata_of_signing_key() {
        let signing: SigningKey<String> = serde_json::from_str(FIXTURE_WITH_EXPIRATION).unwrap();
        let key_id = signing.key_id();
        let expired_at = signing.expired_at();

        let authorized = AuthorizedKey::from(signing);
        assert_eq!(authorized.key_id(), key_id);
        assert_eq!(authorized.expired_at(), expired_at);
        assert_eq!(authorized.comment().map(String::as_str), Some("release signing"));
    }

    #[test]
    fn export_does_not_contain_secret() {
        let signing: SigningKey<String> = serde_json::from_str(FIXTURE_WITH_EXPIRATION).unwrap();
        let authorized = AuthorizedKey::from(signing);

        let json = serde_json::to_value(&authorized).unwrap();
        assert!(json.get("secret_key").is_none());
        assert!(json.get("public_key").and_then(|k| k.as_str()).is_some());

        let imported: AuthorizedKey<String> = serde_json::from_value(json).unwrap();
        assert_eq!(imported.key_id(), authorized.key_id());
    }

    #[test]
    fn rejects_invalid_hex() {
        let json = r#"{"public_key":"not hex","created_at":"2024-12-23T00:12:54Z"}"#;
        let key: Result<AuthorizedKey<()>, _> = serde_json::from_str(json);
        assert!(key.is_err());
    }
}
