//! Credential hashing and verification.
//!
//! # Responsibility
//! - Derive salted, iterated SHA-256 digests from account secrets.
//! - Encode and parse the stored `hl1$<salt>$<digest>` form.
//! - Verify candidate secrets against a stored digest in constant time.
//!
//! # Invariants
//! - Plaintext secrets are never stored, and never appear in errors or
//!   `Debug` output.
//! - Every derivation draws a fresh random salt, so equal secrets do not
//!   produce equal encodings.

use sha2::{Digest, Sha256};

const ENCODING_VERSION: &str = "hl1";
const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;
const HASH_ITERATIONS: u32 = 10_000;

/// Errors from deriving or parsing a credential hash.
#[derive(Debug)]
pub enum CredentialError {
    /// An empty secret was offered for derivation.
    EmptySecret,
    /// The operating system failed to provide salt randomness.
    Rng(getrandom::Error),
    /// A stored encoding did not match the `hl1$<salt>$<digest>` form.
    ///
    /// The detail is a static description; stored content is never echoed.
    Malformed(&'static str),
}

impl std::fmt::Display for CredentialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialError::EmptySecret => write!(f, "credential secret must not be empty"),
            CredentialError::Rng(err) => write!(f, "failed to gather salt randomness: {err}"),
            CredentialError::Malformed(detail) => {
                write!(f, "malformed credential encoding: {detail}")
            }
        }
    }
}

impl std::error::Error for CredentialError {}

/// A salted, iterated SHA-256 digest of an account secret.
///
/// The stored form is `hl1$<hex salt>$<hex digest>` with a 16-byte salt and a
/// 32-byte digest. The version tag leaves room to migrate the scheme without
/// guessing at old rows.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialHash {
    salt: [u8; SALT_LEN],
    digest: [u8; DIGEST_LEN],
}

impl CredentialHash {
    /// Derives a hash from `secret` with a freshly drawn salt.
    pub fn derive(secret: &str) -> Result<Self, CredentialError> {
        if secret.is_empty() {
            return Err(CredentialError::EmptySecret);
        }
        let mut salt = [0u8; SALT_LEN];
        getrandom::getrandom(&mut salt).map_err(CredentialError::Rng)?;
        let digest = iterated_digest(&salt, secret.as_bytes());
        Ok(CredentialHash { salt, digest })
    }

    /// Parses the stored `hl1$<salt>$<digest>` encoding.
    pub fn parse(encoded: &str) -> Result<Self, CredentialError> {
        let mut fields = encoded.split('$');
        let (Some(version), Some(salt_hex), Some(digest_hex), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(CredentialError::Malformed(
                "expected three `$`-separated fields",
            ));
        };
        if version != ENCODING_VERSION {
            return Err(CredentialError::Malformed("unrecognized encoding version"));
        }
        let salt = decode_fixed::<SALT_LEN>(salt_hex, "salt is not 16 bytes of hex")?;
        let digest = decode_fixed::<DIGEST_LEN>(digest_hex, "digest is not 32 bytes of hex")?;
        Ok(CredentialHash { salt, digest })
    }

    /// Renders the stored encoding.
    pub fn encode(&self) -> String {
        format!(
            "{ENCODING_VERSION}${}${}",
            hex::encode(self.salt),
            hex::encode(self.digest)
        )
    }

    /// Checks `candidate` against the stored digest.
    ///
    /// The digest comparison is constant-time; the derivation itself
    /// dominates the cost either way.
    pub fn verify(&self, candidate: &str) -> bool {
        let candidate_digest = iterated_digest(&self.salt, candidate.as_bytes());
        constant_time_eq(&candidate_digest, &self.digest)
    }
}

impl std::fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHash").finish_non_exhaustive()
    }
}

fn iterated_digest(salt: &[u8; SALT_LEN], secret: &[u8]) -> [u8; DIGEST_LEN] {
    let mut digest = [0u8; DIGEST_LEN];
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(secret);
    digest.copy_from_slice(hasher.finalize().as_slice());
    for _ in 1..HASH_ITERATIONS {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(digest);
        digest.copy_from_slice(hasher.finalize().as_slice());
    }
    digest
}

fn decode_fixed<const N: usize>(
    hex_text: &str,
    detail: &'static str,
) -> Result<[u8; N], CredentialError> {
    let bytes = hex::decode(hex_text).map_err(|_| CredentialError::Malformed(detail))?;
    bytes
        .try_into()
        .map_err(|_| CredentialError::Malformed(detail))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (lhs, rhs) in a.iter().zip(b.iter()) {
        diff |= lhs ^ rhs;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_then_verify_accepts_the_secret() {
        let hash = CredentialHash::derive("correct horse").unwrap();
        assert!(hash.verify("correct horse"));
        assert!(!hash.verify("wrong horse"));
    }

    #[test]
    fn derive_rejects_empty_secret() {
        assert!(matches!(
            CredentialHash::derive(""),
            Err(CredentialError::EmptySecret)
        ));
    }

    #[test]
    fn fresh_salt_gives_distinct_encodings() {
        let first = CredentialHash::derive("secret").unwrap();
        let second = CredentialHash::derive("secret").unwrap();
        assert_ne!(first.encode(), second.encode());
        assert!(second.verify("secret"));
    }

    #[test]
    fn encode_parse_round_trip_preserves_verification() {
        let hash = CredentialHash::derive("round trip").unwrap();
        let reparsed = CredentialHash::parse(&hash.encode()).unwrap();
        assert_eq!(hash, reparsed);
        assert!(reparsed.verify("round trip"));
    }

    #[test]
    fn encoding_carries_the_version_tag() {
        let hash = CredentialHash::derive("secret").unwrap();
        assert!(hash.encode().starts_with("hl1$"));
    }

    #[test]
    fn parse_rejects_field_count_and_version_mismatches() {
        assert!(matches!(
            CredentialHash::parse("plaintext"),
            Err(CredentialError::Malformed(_))
        ));
        assert!(matches!(
            CredentialHash::parse("hl1$abcd"),
            Err(CredentialError::Malformed(_))
        ));
        let rewritten = CredentialHash::derive("secret")
            .unwrap()
            .encode()
            .replacen("hl1", "hl9", 1);
        assert!(matches!(
            CredentialHash::parse(&rewritten),
            Err(CredentialError::Malformed(_))
        ));
    }

    #[test]
    fn parse_rejects_wrong_length_or_non_hex_fields() {
        assert!(matches!(
            CredentialHash::parse("hl1$00ff$0011"),
            Err(CredentialError::Malformed(_))
        ));
        assert!(matches!(
            CredentialHash::parse("hl1$zz$0011"),
            Err(CredentialError::Malformed(_))
        ));
    }

    #[test]
    fn debug_output_redacts_hash_material() {
        let hash = CredentialHash::derive("secret").unwrap();
        let rendered = format!("{hash:?}");
        assert_eq!(rendered, "CredentialHash { .. }");
    }
}
