//! Short code generation and validation

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::errors::{Result, ShortyError};

/// 随机短码字母表（字母和数字）
pub const CODE_ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_CODE_LENGTH: usize = 6;

pub const MIN_CUSTOM_CODE_LENGTH: usize = 3;
pub const MAX_CUSTOM_CODE_LENGTH: usize = 32;

// Largest multiple of 62 that fits in a byte; bytes at or above it are rejected
// so that every alphabet index is equally likely.
const REJECTION_BOUND: u8 = (256 - 256 % CODE_ALPHABET.len()) as u8;

/// Source of random bytes used to mint short codes.
///
/// Production code uses [`OsRandom`]; tests plug in scripted sources to force
/// collisions or entropy failures.
pub trait RandomSource: Send + Sync {
    fn fill(&self, buf: &mut [u8]) -> Result<()>;
}

/// The operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| ShortyError::random_source(format!("OS entropy source failed: {}", e)))
    }
}

/// Generate a random code of `length` characters from the OS CSPRNG.
pub fn generate_random_code(length: usize) -> Result<String> {
    generate_random_code_with(&OsRandom, length)
}

/// Generate a random code using the given source.
///
/// A `length` of 0 falls back to [`DEFAULT_CODE_LENGTH`].
pub fn generate_random_code_with(source: &dyn RandomSource, length: usize) -> Result<String> {
    let length = if length == 0 {
        DEFAULT_CODE_LENGTH
    } else {
        length
    };

    let mut code = String::with_capacity(length);
    let mut buf = vec![0u8; length];

    while code.len() < length {
        source.fill(&mut buf)?;
        for &byte in &buf {
            if byte >= REJECTION_BOUND {
                continue;
            }
            code.push(CODE_ALPHABET[byte as usize % CODE_ALPHABET.len()] as char);
            if code.len() == length {
                break;
            }
        }
    }

    Ok(code)
}

/// 检查短码是否满足 `^[A-Za-z0-9_-]{3,32}$`
pub fn is_valid_short_code(code: &str) -> bool {
    (MIN_CUSTOM_CODE_LENGTH..=MAX_CUSTOM_CODE_LENGTH).contains(&code.len())
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Validate a caller-supplied custom code.
pub fn validate_custom_code(code: &str) -> Result<()> {
    if is_valid_short_code(code) {
        Ok(())
    } else {
        Err(ShortyError::invalid_input(format!(
            "invalid custom code '{}' (use {}-{} chars: a-zA-Z0-9_-)",
            code, MIN_CUSTOM_CODE_LENGTH, MAX_CUSTOM_CODE_LENGTH
        )))
    }
}
