//! Free project identifiers.

use std::collections::HashSet;

use thiserror::Error;

/// Length of a generated project id.
pub const FREE_ID_LEN: usize = 16;
/// Characters a generated id is drawn from.
pub const FREE_ID_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

// Largest multiple of the alphabet size that fits in a byte; random bytes at
// or above it are discarded so every character is equally likely.
const ACCEPT_BELOW: u8 = (256 / FREE_ID_ALPHABET.len() * FREE_ID_ALPHABET.len()) as u8;

#[derive(Debug, Error)]
pub enum IdError {
    #[error("random source failed: {0}")]
    RngFailed(String),
}

/// Generate an id that is not in `existing`, using the OS random source.
///
/// # Examples
/// ```
/// use std::collections::HashSet;
///
/// use whinstone_core::{FREE_ID_LEN, generate_free_id};
///
/// let id = generate_free_id(&HashSet::new())?;
/// assert_eq!(id.len(), FREE_ID_LEN);
/// # Ok::<(), whinstone_core::IdError>(())
/// ```
pub fn generate_free_id(existing: &HashSet<String>) -> Result<String, IdError> {
    first_free(existing, random_id)
}

fn first_free(
    existing: &HashSet<String>,
    mut next: impl FnMut() -> Result<String, IdError>,
) -> Result<String, IdError> {
    loop {
        let candidate = next()?;
        if !existing.contains(&candidate) {
            return Ok(candidate);
        }
        tracing::debug!(%candidate, "generated id already taken, retrying");
    }
}

fn random_id() -> Result<String, IdError> {
    let mut id = String::with_capacity(FREE_ID_LEN);
    let mut buf = [0u8; 2 * FREE_ID_LEN];
    while id.len() < FREE_ID_LEN {
        getrandom::getrandom(&mut buf).map_err(|e| IdError::RngFailed(e.to_string()))?;
        let accepted = buf.iter().filter(|&&b| b < ACCEPT_BELOW);
        for &byte in accepted.take(FREE_ID_LEN - id.len()) {
            let index = usize::from(byte) % FREE_ID_ALPHABET.len();
            id.push(char::from(FREE_ID_ALPHABET[index]));
        }
    }
    Ok(id)
}
