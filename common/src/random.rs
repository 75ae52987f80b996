use std::fmt;

use near_sdk::env;
pub use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

/// Anything that can hand out uniformly random bytes, one at a time.
pub trait ByteSource {
    fn next_byte(&mut self) -> u8;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectError {
    EmptyInput,
    /// A single byte cannot address more than 256 candidates.
    TooManyCandidates(usize),
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "no candidates to select from"),
            Self::TooManyCandidates(count) => {
                write!(f, "cannot select uniformly among {} candidates with a byte", count)
            }
        }
    }
}

impl std::error::Error for SelectError {}

/// Picks one candidate with probability exactly `1 / candidates.len()`.
///
/// Bytes above the largest multiple of `n` that fits in a byte are rejected
/// and redrawn, so `byte % n` carries no modulo bias. A single candidate is
/// returned without touching the source.
pub fn select_one<T, S>(candidates: &[T], source: &mut S) -> Result<T, SelectError>
where
    T: Copy,
    S: ByteSource + ?Sized,
{
    let n = candidates.len();
    match n {
        0 => return Err(SelectError::EmptyInput),
        1 => return Ok(candidates[0]),
        n if n > 256 => return Err(SelectError::TooManyCandidates(n)),
        _ => {}
    }

    let limit = (256 / n) * n - 1;

    let byte = loop {
        let byte = source.next_byte() as usize;
        if byte <= limit {
            break byte;
        }
    };

    Ok(candidates[byte % n])
}

impl<R: RngCore + ?Sized> ByteSource for R {
    fn next_byte(&mut self) -> u8 {
        let mut byte = [0u8; 1];
        self.fill_bytes(&mut byte);
        return byte[0];
    }
}

/// ChaCha20 generator keyed by `sha256(entropy || domain)`, so equal entropy
/// used for different purposes yields unrelated streams.
pub fn seeded_rng(entropy: &[u8], domain: u64) -> ChaCha20Rng {
    let material = [entropy, &domain.to_le_bytes()].concat();
    return ChaCha20Rng::from_seed(env::sha256_array(&material));
}
