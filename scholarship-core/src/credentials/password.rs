//! Salted PBKDF2-HMAC-SHA256 password hashing.
//!
//! Stored form: `pbkdf2-sha256$<iterations>$<salt b64>$<hash b64>`

#[cfg(test)]
use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;

use crate::error::{ScholarError, ScholarResult};

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

pub const DEFAULT_HASH_ITERATIONS: u32 = 100_000;

/// Hashes new passwords with a fresh random salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    iterations: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        PasswordHasher::new(DEFAULT_HASH_ITERATIONS)
    }
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Self {
        PasswordHasher {
            iterations: iterations.max(1),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn hash(&self, password: &str) -> PasswordHash {
        let mut salt = vec![0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let key = derive_key(password, &salt, self.iterations);

        PasswordHash {
            iterations: self.iterations,
            salt,
            key,
        }
    }

    /// Check `password` against a stored credential, if there is one.
    ///
    /// With no stored credential, or one that does not parse, a decoy hash at
    /// this hasher's iteration count is derived anyway so the answer takes as
    /// long as a real mismatch.
    pub fn verify(&self, password: &str, stored: Option<&str>) -> bool {
        match stored.map(str::parse::<PasswordHash>) {
            Some(Ok(hash)) => return hash.matches(password),
            Some(Err(e)) => log::warn!("{}", e),
            None => {}
        }

        let _ = self.decoy().matches(password);
        false
    }

    fn decoy(&self) -> PasswordHash {
        PasswordHash {
            iterations: self.iterations,
            salt: vec![0u8; SALT_LEN],
            key: vec![0u8; KEY_LEN],
        }
    }
}

/// A parsed stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    iterations: u32,
    salt: Vec<u8>,
    key: Vec<u8>,
}

impl PasswordHash {
    /// Recompute with the stored salt and iteration count and compare.
    pub fn matches(&self, password: &str) -> bool {
        let candidate = derive_key(password, &self.salt, self.iterations);
        constant_time_eq(&candidate, &self.key)
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}${}${}${}",
            SCHEME,
            self.iterations,
            B64.encode(&self.salt),
            B64.encode(&self.key)
        )
    }
}

impl FromStr for PasswordHash {
    type Err = ScholarError;

    fn from_str(s: &str) -> ScholarResult<Self> {
        let malformed = |what: &str| ScholarError::Credential(what.to_string());

        let mut parts = s.split('$');
        let (Some(scheme), Some(iterations), Some(salt), Some(key), None) =
            (parts.next(), parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed("expected four '$'-separated fields"));
        };

        if scheme != SCHEME {
            return Err(malformed(&format!("unknown scheme '{}'", scheme)));
        }

        let iterations: u32 = iterations
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| malformed("bad iteration count"))?;
        let salt = B64.decode(salt).map_err(|_| malformed("bad salt encoding"))?;
        let key = B64.decode(key).map_err(|_| malformed("bad hash encoding"))?;

        if key.len() != KEY_LEN {
            return Err(malformed("bad hash length"));
        }

        Ok(PasswordHash {
            iterations,
            salt,
            key,
        })
    }
}

/// Check `password` against a stored credential string.
/// A malformed stored value never matches.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.parse::<PasswordHash>() {
        Ok(hash) => hash.matches(password),
        Err(e) => {
            log::warn!("{}", e);
            false
        }
    }
}

#[cfg(test)]
thread_local! {
    static DERIVATIONS: Cell<usize> = const { Cell::new(0) };
}

/// Key derivations run on the current thread.
#[cfg(test)]
pub(crate) fn derivations() -> usize {
    DERIVATIONS.with(Cell::get)
}

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> Vec<u8> {
    #[cfg(test)]
    DERIVATIONS.with(|n| n.set(n.get() + 1));

    let mut key = vec![0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    key
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(1_000)
    }

    #[test]
    fn hash_verifies_original_password_only() {
        let stored = hasher().hash("pw1").to_string();
        assert!(verify_password("pw1", &stored));
        assert!(!verify_password("pw2", &stored));
        assert!(!verify_password("", &stored));
    }

    #[test]
    fn same_password_gets_different_salts() {
        let a = hasher().hash("secret").to_string();
        let b = hasher().hash("secret").to_string();
        assert_ne!(a, b);
        assert!(verify_password("secret", &a));
        assert!(verify_password("secret", &b));
    }

    #[test]
    fn stored_form_round_trips_through_parse() {
        let hash = hasher().hash("pw");
        let stored = hash.to_string();
        assert!(stored.starts_with("pbkdf2-sha256$1000$"));
        assert_eq!(stored.parse::<PasswordHash>().unwrap(), hash);
    }

    #[test]
    fn malformed_credentials_never_match() {
        // A bare SHA-256 hex digest (unsalted legacy format)
        let legacy = "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";
        assert!(!verify_password("password", legacy));
        assert!(!verify_password("pw", "pbkdf2-sha256$0$AAAA$AAAA"));
        assert!(!verify_password("pw", "md5$1$AAAA$AAAA"));
        assert!(matches!(
            "pbkdf2-sha256$10$!!$AAAA".parse::<PasswordHash>(),
            Err(ScholarError::Credential(_))
        ));
    }

    #[test]
    fn missing_credential_still_derives_a_key() {
        let before = derivations();
        assert!(!hasher().verify("pw", None));
        assert_eq!(derivations(), before + 1);

        let decoy = hasher().decoy();
        assert_eq!(decoy.iterations, 1_000);
        assert!(!decoy.matches(""));
    }

    #[test]
    fn malformed_credential_costs_the_same_as_a_mismatch() {
        let before = derivations();
        assert!(!hasher().verify("password", Some("not-a-hash")));
        assert_eq!(derivations(), before + 1);
    }

    #[test]
    fn verify_accepts_stored_match() {
        let stored = hasher().hash("pw1").to_string();
        let before = derivations();
        assert!(hasher().verify("pw1", Some(&stored)));
        assert!(!hasher().verify("pw2", Some(&stored)));
        assert_eq!(derivations(), before + 2);
    }

    #[test]
    fn iterations_are_at_least_one() {
        assert_eq!(PasswordHasher::new(0).iterations(), 1);
        assert_eq!(PasswordHasher::default().iterations(), DEFAULT_HASH_ITERATIONS);
    }
}
