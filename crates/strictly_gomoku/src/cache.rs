//! Content-addressed staleness gate for derived artifacts.
//!
//! A derived artifact (analysis text, a render) is stored next to the
//! [`ContentHash`] of the board it was computed from. It may be reused
//! only while that hash equals the current one.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Hex digest of board contents. Used for cache validity only.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    pub(crate) fn from_digest(digest: &[u8]) -> Self {
        Self(hex::encode(digest))
    }

    /// Wraps a previously stored hash string.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into().trim().to_string())
    }

    /// The hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A value tagged with the hash it was computed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo<T> {
    key: ContentHash,
    value: T,
}

impl<T> Memo<T> {
    /// Tags `value` with `key`.
    pub fn new(key: ContentHash, value: T) -> Self {
        Self { key, value }
    }

    /// True iff the tag equals `current`.
    pub fn is_fresh(&self, current: &ContentHash) -> bool {
        self.key == *current
    }

    /// The value, only while fresh.
    pub fn get(&self, current: &ContentHash) -> Option<&T> {
        self.is_fresh(current).then_some(&self.value)
    }
}

/// An optional [`Memo`], the single place the freshness rule is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoSlot<T>(Option<Memo<T>>);

impl<T> Default for MemoSlot<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> MemoSlot<T> {
    /// An empty slot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the value when it was computed against `current`.
    #[instrument(skip_all, fields(current = %current))]
    pub fn lookup(&self, current: &ContentHash) -> Option<&T> {
        let hit = self.0.as_ref().and_then(|memo| memo.get(current));
        debug!(hit = hit.is_some(), "Memo lookup");
        hit
    }

    /// Replaces the slot with `value` tagged by `key`.
    pub fn store(&mut self, key: ContentHash, value: T) -> &T {
        &self.0.insert(Memo::new(key, value)).value
    }

    /// Drops any stored value.
    pub fn clear(&mut self) {
        self.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(s: &str) -> ContentHash {
        ContentHash::from_hex(s)
    }

    #[test]
    fn test_memo_fresh_only_on_equal_hash() {
        let memo = Memo::new(hash("aa"), "text");
        assert_eq!(memo.get(&hash("aa")), Some(&"text"));
        assert_eq!(memo.get(&hash("bb")), None);
    }

    #[test]
    fn test_slot_store_and_lookup() {
        let mut slot = MemoSlot::empty();
        assert_eq!(slot.lookup(&hash("aa")), None);
        slot.store(hash("aa"), 1);
        assert_eq!(slot.lookup(&hash("aa")), Some(&1));
        assert_eq!(slot.lookup(&hash("bb")), None);
        slot.clear();
        assert!(slot.is_empty());
    }

    #[test]
    fn test_digest_is_lower_hex() {
        let h = ContentHash::from_digest(&[0x00, 0xab, 0x1f]);
        assert_eq!(h.as_str(), "00ab1f");
    }
}
