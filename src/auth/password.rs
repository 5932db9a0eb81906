//! Salted password hashing (PBKDF2-HMAC-SHA256)
//!
//! Stored format: `pbkdf2-sha256$<iterations>$<salt hex>$<hash hex>`

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::error::{HubError, Result};

type HmacSha256 = Hmac<Sha256>;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;

#[derive(Debug, Clone)]
pub struct PasswordHasher {
    iterations: u32,
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt: [u8; SALT_LEN] = rand::rng().random();
        let derived = pbkdf2(password.as_bytes(), &salt, self.iterations)?;
        Ok(format!(
            "{}${}${}${}",
            SCHEME,
            self.iterations,
            hex::encode(salt),
            hex::encode(derived)
        ))
    }

    /// Check a password against a stored hash; malformed hashes never verify
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let parts: Vec<&str> = stored.split('$').collect();
        if parts.len() != 4 || parts[0] != SCHEME {
            return false;
        }

        let Ok(iterations) = parts[1].parse::<u32>() else {
            return false;
        };
        let (Ok(salt), Ok(expected)) = (hex::decode(parts[2]), hex::decode(parts[3])) else {
            return false;
        };

        match pbkdf2(password.as_bytes(), &salt, iterations) {
            Ok(derived) => constant_time_eq(&derived, &expected),
            Err(_) => false,
        }
    }
}

/// Single-block PBKDF2 (32-byte output)
fn pbkdf2(password: &[u8], salt: &[u8], iterations: u32) -> Result<[u8; 32]> {
    let new_mac = || {
        HmacSha256::new_from_slice(password)
            .map_err(|e| HubError::Internal(format!("HMAC key error: {}", e)))
    };

    let mut mac = new_mac()?;
    mac.update(salt);
    mac.update(&1u32.to_be_bytes());
    let mut block = [0u8; 32];
    block.copy_from_slice(&mac.finalize().into_bytes());
    let mut output = block;

    for _ in 1..iterations {
        let mut mac = new_mac()?;
        mac.update(&block);
        block.copy_from_slice(&mac.finalize().into_bytes());
        for (o, b) in output.iter_mut().zip(block.iter()) {
            *o ^= b;
        }
    }

    Ok(output)
}

pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
