mod key;
mod metadata;
mod public_key;
mod signing_key;
mod timestamp;
mod user;

pub mod expiration;
pub mod keyset;

pub use key::KeyMetadata;
pub use keyset::{AuthorizedKeys, Keyset, KeysetHandle, SigningKeys};
pub use public_key::AuthorizedKey;
pub use signing_key::SigningKey;
pub use user::User;

pub mod error {
    pub use crate::expiration::{CheckError, ConfigError, LookupError};
    pub use crate::keyset::KeysetError;
    pub use crate::timestamp::TimestampError;
}
