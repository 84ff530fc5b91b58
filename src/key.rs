use jiff::Timestamp;

/// Information available to identify keys and tell their age
pub trait KeyMetadata {
    /// Identifier of the key inside its keyset
    fn key_id(&self) -> u32;

    /// Timestamp when the key was generated
    fn created_at(&self) -> Timestamp;

    /// Timestamp when the key is supposed to expire
    fn expired_at(&self) -> Option<Timestamp>;
}

/// Key identifier derived from a signify key number: its first four bytes, big-endian
pub(crate) fn key_id(keynum: &libsignify::KeyNumber) -> u32 {
    let bytes: &[u8] = keynum.as_ref();
    bytes
        .iter()
        .take(4)
        .fold(0, |id, byte| (id << 8) | u32::from(*byte))
}
