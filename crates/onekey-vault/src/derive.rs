//! Two-stage HMAC-SHA512 credential derivation.
//!
//! ```text
//! key_material = HMAC-SHA512(key = master_secret, msg = domain)
//! credential   = hex(HMAC-SHA512(key = key_material, msg = service))
//! ```
//!
//! The intermediate key is scoped to one domain, so a leaked leaf credential
//! reveals neither the master secret nor its siblings, and every credential
//! can be regenerated from the master secret alone.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

use crate::types::DerivedCredential;

type HmacSha512 = Hmac<Sha512>;

/// Output size of SHA-512 in bytes.
const MAC_SIZE: usize = 64;

/// Compute `HMAC-SHA512(key, message)` into a buffer that is zeroed on drop.
fn hmac_sha512(key: &[u8], message: &[u8]) -> Zeroizing<[u8; MAC_SIZE]> {
    let mut mac = <HmacSha512 as Mac>::new_from_slice(key)
        .expect("HMAC should accept keys of any length");
    mac.update(message);

    let mut digest = mac.finalize().into_bytes();
    let mut out = Zeroizing::new([0u8; MAC_SIZE]);
    out.copy_from_slice(&digest);
    digest.as_mut_slice().zeroize();
    out
}

/// Derive the credential for `(domain, service)` from `master_secret`.
///
/// Pure and deterministic. Label validation and caching are the vault's job.
pub fn derive_credential(master_secret: &[u8], domain: &str, service: &str) -> DerivedCredential {
    let key_material = hmac_sha512(master_secret, domain.as_bytes());
    let leaf = hmac_sha512(key_material.as_slice(), service.as_bytes());
    DerivedCredential::from_hex(hex::encode(leaf.as_slice()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &[u8] = b"s3cr3t-seed";

    #[test]
    fn test_hmac_sha512_rfc4231_case_2() {
        let mac = hmac_sha512(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            hex::encode(mac.as_slice()),
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_known_credentials() {
        let github = derive_credential(SEED, "AI_OPS", "GITHUB_TOKEN");
        assert_eq!(
            github.expose(),
            "ed6b8868fc47734cbaa28eb8f97c0a7ca454bf8deff3a1c886dc03366016c2d9\
             2cf9c41028c7c0ebb0b346c09fed199dd80d1de3be32396c613000b7e62932df"
        );

        let slack = derive_credential(SEED, "AI_OPS", "SLACK_TOKEN");
        assert_eq!(
            slack.expose(),
            "2605a5262a2a5e8698e9c9e4ce9a4eb0e232cf03d467e82dc93e777486d0e97f\
             d83a88eba1afbe69942a9a20b9f6a7d956dbc3d29c00a3ead648cda572d2421e"
        );
    }

    #[test]
    fn test_binary_secret() {
        let cred = derive_credential(b"\x00\xffbinary", "COLLAB", "NOTION_TOKEN");
        assert_eq!(
            cred.expose(),
            "2d7def9b53c197d002ae8f50fdf459d753f6ee530697cdcf103ebbe00bcd4602\
             3c493c4a6f762fd8bf28870a1fdc5bc973f5e6a23d83f2b08dabf77e789e7064"
        );
    }

    #[test]
    fn test_chains_through_domain_key() {
        let key_material = hmac_sha512(SEED, b"REVENUE");
        let expected = hmac_sha512(key_material.as_slice(), b"STRIPE_SECRET");
        let cred = derive_credential(SEED, "REVENUE", "STRIPE_SECRET");
        assert_eq!(cred.expose(), hex::encode(expected.as_slice()));
    }

    #[test]
    fn test_output_shape() {
        let cred = derive_credential(SEED, "COLLAB", "LINEAR_API_KEY");
        assert_eq!(cred.len(), DerivedCredential::HEX_LEN);
        assert!(cred
            .expose()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_label_boundaries_do_not_collide() {
        let a = derive_credential(SEED, "AB", "C");
        let b = derive_credential(SEED, "A", "BC");
        let c = derive_credential(SEED, "A:B", "C");
        let d = derive_credential(SEED, "A", "B:C");
        assert_ne!(a, b);
        assert_ne!(c, d);
    }

    #[test]
    fn test_swapped_labels_differ() {
        let a = derive_credential(SEED, "AI_OPS", "GITHUB_TOKEN");
        let b = derive_credential(SEED, "GITHUB_TOKEN", "AI_OPS");
        assert_ne!(a, b);
    }
}
