//! Entry persistence: the `EntryStore` boundary plus in-memory and sled-backed stores.
//! The sled store encrypts entries at rest when a key is supplied (`SPARK_JOURNAL_KEY`,
//! 64 hex chars = 32 bytes). Journal text is never logged.

use crate::history::Window;
use crate::journal::JournalEntry;
use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm,
};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::path::Path;

pub const ENV_JOURNAL_KEY: &str = "SPARK_JOURNAL_KEY";
const JOURNAL_TREE: &str = "journal";
const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sled: {0}")]
    Sled(#[from] sled::Error),
    #[error("serde: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("cipher: {0}")]
    Cipher(String),
    #[error("journal key must be 64 hex characters")]
    InvalidKey,
}

/// Collaborator boundary for saved entries. Listing is newest first.
pub trait EntryStore: Send + Sync {
    fn create(&self, entry: &JournalEntry) -> Result<(), StoreError>;

    fn list_all(&self) -> Result<Vec<JournalEntry>, StoreError>;

    /// Removes the entry; returns whether it existed.
    fn delete(&self, id: &str) -> Result<bool, StoreError>;

    fn list(&self, window: Window) -> Result<Vec<JournalEntry>, StoreError> {
        self.list_at(window, Utc::now())
    }

    fn list_at(&self, window: Window, now: DateTime<Utc>) -> Result<Vec<JournalEntry>, StoreError> {
        let mut entries = self.list_all()?;
        entries.retain(|e| window.contains(e.timestamp, now));
        Ok(entries)
    }
}

fn newest_first(entries: &mut [JournalEntry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
}

/// Process-local store; contents vanish with the process.
#[derive(Default)]
pub struct MemoryEntryStore {
    entries: DashMap<String, JournalEntry>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EntryStore for MemoryEntryStore {
    fn create(&self, entry: &JournalEntry) -> Result<(), StoreError> {
        self.entries.insert(entry.id.clone(), entry.clone());
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<JournalEntry>, StoreError> {
        let mut out: Vec<JournalEntry> = self.entries.iter().map(|r| r.value().clone()).collect();
        newest_first(&mut out);
        Ok(out)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.entries.remove(id).is_some())
    }
}

/// Parses a 64-char hex key (whitespace ignored).
pub fn parse_key(hex: &str) -> Result<[u8; KEY_LEN], StoreError> {
    let hex: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
    if hex.len() != KEY_LEN * 2 || !hex.is_ascii() {
        return Err(StoreError::InvalidKey);
    }
    let mut key = [0u8; KEY_LEN];
    for (i, byte) in key.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| StoreError::InvalidKey)?;
    }
    Ok(key)
}

/// Entries in the sled tree `journal`, keyed by entry id. Values are JSON, or
/// `nonce || ciphertext` when a key is configured.
pub struct SledEntryStore {
    tree: sled::Tree,
    cipher: Option<Aes256Gcm>,
}

impl SledEntryStore {
    /// Opens the store at `path`, encrypting when `SPARK_JOURNAL_KEY` is set.
    /// A set but malformed key is an error rather than a silent plaintext fallback.
    pub fn open_path(path: &Path) -> Result<Self, StoreError> {
        Self::open_with_key(path, crate::config::journal_key_from_env()?)
    }

    pub fn open_with_key(path: &Path, key: Option<[u8; KEY_LEN]>) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let tree = db.open_tree(JOURNAL_TREE)?;
        let cipher = match key {
            Some(k) => {
                Some(Aes256Gcm::new_from_slice(&k).map_err(|_| StoreError::InvalidKey)?)
            }
            None => None,
        };
        tracing::info!(
            target: "spark::store",
            path = %path.display(),
            encrypted = cipher.is_some(),
            entries = tree.len(),
            "Journal store opened"
        );
        Ok(Self { tree, cipher })
    }

    pub fn is_encrypted(&self) -> bool {
        self.cipher.is_some()
    }

    fn seal(&self, plain: Vec<u8>) -> Result<Vec<u8>, StoreError> {
        let Some(ref cipher) = self.cipher else {
            return Ok(plain);
        };
        let nonce = Aes256Gcm::generate_nonce(OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, plain.as_ref())
            .map_err(|e| StoreError::Cipher(e.to_string()))?;
        let mut out = Vec::with_capacity(nonce.len() + ciphertext.len());
        out.extend_from_slice(nonce.as_slice());
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn open_blob(&self, data: &[u8]) -> Result<JournalEntry, StoreError> {
        let Some(ref cipher) = self.cipher else {
            return Ok(serde_json::from_slice(data)?);
        };
        if data.len() < NONCE_LEN {
            return Err(StoreError::Cipher("corrupt blob".to_string()));
        }
        let (nonce_slice, ct) = data.split_at(NONCE_LEN);
        let nonce = aes_gcm::Nonce::from_slice(nonce_slice);
        let plain = cipher
            .decrypt(nonce, ct)
            .map_err(|e| StoreError::Cipher(e.to_string()))?;
        Ok(serde_json::from_slice(&plain)?)
    }

    pub fn get(&self, id: &str) -> Result<Option<JournalEntry>, StoreError> {
        match self.tree.get(id.as_bytes())? {
            Some(data) => Ok(Some(self.open_blob(&data)?)),
            None => Ok(None),
        }
    }

    pub fn flush(&self) -> Result<(), StoreError> {
        self.tree.flush()?;
        Ok(())
    }
}

impl EntryStore for SledEntryStore {
    fn create(&self, entry: &JournalEntry) -> Result<(), StoreError> {
        let blob = self.seal(serde_json::to_vec(entry)?)?;
        self.tree.insert(entry.id.as_bytes(), blob)?;
        tracing::info!(
            target: "spark::store",
            id = %entry.id,
            sentiment = %entry.analysis.sentiment,
            "Journal entry stored"
        );
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<JournalEntry>, StoreError> {
        let mut out = Vec::with_capacity(self.tree.len());
        for item in self.tree.iter() {
            let (key, value) = item?;
            match self.open_blob(&value) {
                Ok(entry) => out.push(entry),
                Err(e) => {
                    tracing::warn!(
                        target: "spark::store",
                        key = %String::from_utf8_lossy(&key),
                        error = %e,
                        "Skipping unreadable journal entry"
                    );
                }
            }
        }
        newest_first(&mut out);
        Ok(out)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let existed = self.tree.remove(id.as_bytes())?.is_some();
        tracing::info!(target: "spark::store", id = %id, existed, "Journal entry deleted");
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key_accepts_64_hex_chars() {
        let hex = "00".repeat(31) + "ff";
        let key = parse_key(&hex).unwrap();
        assert_eq!(key[31], 0xff);
        assert_eq!(key[0], 0);
    }

    #[test]
    fn parse_key_rejects_bad_input() {
        assert!(matches!(parse_key("abcd"), Err(StoreError::InvalidKey)));
        assert!(matches!(parse_key(&"zz".repeat(32)), Err(StoreError::InvalidKey)));
    }
}
