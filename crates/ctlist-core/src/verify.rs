//! Detached-signature verification of the log list.
//!
//! The log list is only ever parsed from a [`VerifiedLogList`], which can
//! only be obtained through [`verify_log_list`].

use ed25519_dalek::Verifier as _;
use pkcs8::DecodePublicKey;
use rsa::pkcs1v15::{Signature as RsaSignature, VerifyingKey as RsaVerifyingKey};
use rsa::sha2::Sha256;
use rsa::signature::Verifier as _;
use rsa::RsaPublicKey;

use crate::error::{CtListError, CtListResult};
use crate::source::LogListSource;
use crate::types::LogList;

/// Verifies a detached signature over a message.
pub trait SignatureVerifier {
    fn verify(&self, message: &[u8], signature: &[u8]) -> CtListResult<()>;
}

/// Verifier for a SubjectPublicKeyInfo public key.
#[derive(Debug)]
pub enum PublicKeyVerifier {
    /// Ed25519, 64-byte signature.
    Ed25519(ed25519_dalek::VerifyingKey),

    /// RSA PKCS#1 v1.5 over SHA-256 (`openssl dgst -sha256 -sign`).
    RsaSha256(RsaVerifyingKey<Sha256>),
}

impl PublicKeyVerifier {
    /// Load a `PUBLIC KEY` PEM, selecting the scheme from the key type.
    pub fn from_spki_pem(pem: &str) -> CtListResult<Self> {
        let ed25519_err = match ed25519_dalek::VerifyingKey::from_public_key_pem(pem) {
            Ok(key) => return Ok(Self::Ed25519(key)),
            Err(e) => e,
        };
        let rsa_err = match RsaPublicKey::from_public_key_pem(pem) {
            Ok(key) => return Ok(Self::RsaSha256(RsaVerifyingKey::new(key))),
            Err(e) => e,
        };
        Err(CtListError::Config {
            message: format!(
                "unsupported public key (not Ed25519: {ed25519_err}; not RSA: {rsa_err})"
            ),
        })
    }

    /// Load a DER SubjectPublicKeyInfo.
    pub fn from_spki_der(der: &[u8]) -> CtListResult<Self> {
        if let Ok(key) = ed25519_dalek::VerifyingKey::from_public_key_der(der) {
            return Ok(Self::Ed25519(key));
        }
        RsaPublicKey::from_public_key_der(der)
            .map(|key| Self::RsaSha256(RsaVerifyingKey::new(key)))
            .map_err(|e| CtListError::Config {
                message: format!("unsupported public key: {e}"),
            })
    }

    pub fn algorithm(&self) -> &'static str {
        match self {
            Self::Ed25519(_) => "ed25519",
            Self::RsaSha256(_) => "rsa-pkcs1v15-sha256",
        }
    }
}

fn invalid(reason: impl std::fmt::Display) -> CtListError {
    CtListError::FetchOrVerify {
        message: format!("signature verification failed: {reason}"),
    }
}

impl SignatureVerifier for PublicKeyVerifier {
    fn verify(&self, message: &[u8], signature: &[u8]) -> CtListResult<()> {
        match self {
            Self::Ed25519(key) => {
                let signature = ed25519_dalek::Signature::from_slice(signature)
                    .map_err(|e| invalid(format!("invalid signature bytes: {e}")))?;
                key.verify(message, &signature)
                    .map_err(|_| invalid("ed25519 verification failed"))
            }
            Self::RsaSha256(key) => {
                let signature = RsaSignature::try_from(signature)
                    .map_err(|e| invalid(format!("invalid signature bytes: {e}")))?;
                key.verify(message, &signature)
                    .map_err(|_| invalid("rsa verification failed"))
            }
        }
    }
}

/// Log list bytes whose signature has been checked.
#[derive(Debug, Clone)]
pub struct VerifiedLogList {
    document: Vec<u8>,
}

impl VerifiedLogList {
    pub fn as_bytes(&self) -> &[u8] {
        &self.document
    }

    /// Parse the verified document.
    pub fn parse(&self) -> CtListResult<LogList> {
        LogList::from_slice(&self.document)
    }
}

/// Fetch the log list and check its detached signature.
pub fn verify_log_list(
    source: &dyn LogListSource,
    verifier: &dyn SignatureVerifier,
) -> CtListResult<VerifiedLogList> {
    let signed = source.fetch()?;
    verifier.verify(&signed.document, &signed.signature)?;
    tracing::info!(bytes = signed.document.len(), "log list signature verified");
    Ok(VerifiedLogList {
        document: signed.document,
    })
}
