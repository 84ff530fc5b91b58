use crate::{AuthorizedKey, KeyMetadata, SigningKey};
use jiff::Timestamp;
use snafu::{ensure, Snafu};
use std::collections::HashSet;

/// Ordered collection of keys belonging to one user
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyset<K> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    primary_key_id: Option<u32>,
    keys: Vec<K>,
}

/// Public keys a user has registered as valid for signing updates
pub type AuthorizedKeys<C> = Keyset<AuthorizedKey<C>>;

/// Private keys matching a set of [`AuthorizedKeys`]
pub type SigningKeys<C> = Keyset<SigningKey<C>>;

impl<K: KeyMetadata> Keyset<K> {
    /// The first key becomes the primary one
    pub fn new(keys: Vec<K>) -> Self {
        Self {
            primary_key_id: keys.first().map(KeyMetadata::key_id),
            keys,
        }
    }
}

impl<K> Keyset<K> {
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn primary_key_id(&self) -> Option<u32> {
        self.primary_key_id
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<C> From<SigningKeys<C>> for AuthorizedKeys<C> {
    fn from(value: SigningKeys<C>) -> Self {
        Self {
            primary_key_id: value.primary_key_id,
            keys: value.keys.into_iter().map(AuthorizedKey::from).collect(),
        }
    }
}

/// What is known about a single key, detached from the key material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRecord {
    pub key_id: u32,
    pub created_at: Timestamp,
    pub expired_at: Option<Timestamp>,
}

/// Description of a keyset, without any key material
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeysetInfo {
    pub primary_key_id: Option<u32>,
    pub keys: Vec<KeyRecord>,
}

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum KeysetError {
    #[snafu(display("key id {key_id} appears more than once in keyset"))]
    DuplicateKeyId { key_id: u32 },
    #[snafu(display("primary key id {key_id} is not part of keyset"))]
    UnknownPrimary { key_id: u32 },
}

/// Anything able to describe the keys it holds
pub trait KeysetHandle {
    /// Key records in keyset order
    fn keyset_info(&self) -> Result<KeysetInfo, KeysetError>;
}

impl<K: KeyMetadata> KeysetHandle for Keyset<K> {
    fn keyset_info(&self) -> Result<KeysetInfo, KeysetError> {
        let mut seen = HashSet::with_capacity(self.keys.len());
        let mut keys = Vec::with_capacity(self.keys.len());

        for key in &self.keys {
            let key_id = key.key_id();
            ensure!(seen.insert(key_id), DuplicateKeyIdSnafu { key_id });
            keys.push(KeyRecord {
                key_id,
                created_at: key.created_at(),
                expired_at: key.expired_at(),
            });
        }

        if let Some(key_id) = self.primary_key_id {
            ensure!(seen.contains(&key_id), UnknownPrimarySnafu { key_id });
        }

        tracing::debug!(keys = keys.len(), primary = ?self.primary_key_id, "resolved keyset");
        Ok(KeysetInfo {
            primary_key_id: self.primary_key_id,
            keys,
        })
    }
}
