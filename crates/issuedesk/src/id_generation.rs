//! Content-hash issue identifiers.
//!
//! Ids have the form `{prefix}-{hash}` where `hash` is a base36 slice of a
//! SHA-256 digest over the issue content, the creation instant and a retry
//! nonce. The hash grows from 4 to 6 characters as the store fills up so the
//! collision rate stays low without making small trackers carry long ids.
//!
//! ```
//! use issuedesk::id_generation::IdGenerator;
//!
//! let mut generator = IdGenerator::new("desk");
//! let id = generator.generate("Login Bug", "Users can't log in.", 0).unwrap();
//! assert!(id.starts_with("desk-"));
//! ```

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

const BASE36_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const MAX_NONCE: u32 = 100;
const MAX_HASH_LENGTH: usize = 8;

/// Errors raised while generating an id.
#[derive(Debug, Error)]
pub enum IdGenerationError {
    /// Every nonce at every permitted length collided.
    #[error("unable to generate a unique id after {attempts} attempts")]
    CollisionExhausted {
        /// Total hashes tried.
        attempts: u32,
    },
}

/// Hash-based id generator that remembers every id it has seen.
///
/// Ids are never forgotten, so an id cannot be handed out twice during the
/// generator's lifetime even if the store were to lose the record.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: String,
    existing_ids: HashSet<String>,
}

impl IdGenerator {
    /// Creates a generator for ids starting with `{prefix}-`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            existing_ids: HashSet::new(),
        }
    }

    /// Marks `id` as taken.
    pub fn register_id(&mut self, id: impl Into<String>) {
        self.existing_ids.insert(id.into());
    }

    /// Whether `id` was generated or registered before.
    #[cfg(test)]
    pub(crate) fn is_taken(&self, id: &str) -> bool {
        self.existing_ids.contains(id)
    }

    /// Generates and registers a fresh id.
    ///
    /// `store_size` is the number of issues currently held and selects the
    /// starting hash length. On repeated collisions the length is increased.
    ///
    /// # Errors
    ///
    /// Returns [`IdGenerationError::CollisionExhausted`] if no free id was
    /// found at any length up to eight characters.
    pub fn generate(
        &mut self,
        title: &str,
        description: &str,
        store_size: usize,
    ) -> Result<String, IdGenerationError> {
        let timestamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let mut attempts = 0;

        for length in adaptive_length(store_size)..=MAX_HASH_LENGTH {
            for nonce in 0..MAX_NONCE {
                attempts += 1;
                let id = format!(
                    "{}-{}",
                    self.prefix,
                    hash_content(title, description, timestamp, nonce, length)
                );
                if self.existing_ids.insert(id.clone()) {
                    if nonce > 0 {
                        debug!(nonce, length, "generated unique id after collisions");
                    }
                    return Ok(id);
                }
            }
            warn!(length, "all nonces collided, increasing id length");
        }

        Err(IdGenerationError::CollisionExhausted { attempts })
    }
}

/// 4 characters up to 500 issues, 5 up to 1500, 6 beyond.
fn adaptive_length(store_size: usize) -> usize {
    match store_size {
        0..=500 => 4,
        501..=1500 => 5,
        _ => 6,
    }
}

fn hash_content(title: &str, description: &str, timestamp: i64, nonce: u32, length: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{title}|{description}|{timestamp}|{nonce}").as_bytes());
    let digest = hasher.finalize();

    let mut num = digest
        .iter()
        .take(8)
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));

    let mut chars = vec![b'0'; length];
    for slot in chars.iter_mut().rev() {
        *slot = BASE36_CHARS[(num % 36) as usize];
        num /= 36;
    }
    chars.into_iter().map(char::from).collect()
}
