//! Certificate Transparency log table generator.
//!
//! Turns the signed CT log list into a deterministic Rust source table:
//!
//! - Detached-signature check of the log list (Ed25519 or RSA/SHA-256)
//! - SubjectPublicKeyInfo decoding to the raw log key
//! - SHA-256 key ids, used for deduplication and ordering
//! - Disqualification filtering against an injectable clock
//! - Rendering with each entry's source JSON embedded for audit
//!
//! # Quick Start
//!
//! ```no_run
//! use ctlist_core::{generate, EmitOptions, FileSource, PublicKeyVerifier, SystemClock};
//!
//! # fn example() -> Result<(), ctlist_core::CtListError> {
//! let pem = std::fs::read_to_string("log_list_pubkey.pem").unwrap();
//! let verifier = PublicKeyVerifier::from_spki_pem(&pem)?;
//! let source = FileSource::new("log_list.json", "log_list.sig");
//! let code = generate(&source, &verifier, &SystemClock, &EmitOptions::default())?;
//! print!("{code}");
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod der;
pub mod emit;
pub mod error;
pub mod key_id;
pub mod pipeline;
pub mod registry;
pub mod source;
pub mod types;
pub mod verify;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::GenerateConfig;
pub use der::{raw_public_key, DerError};
pub use emit::{render, EmitOptions, DEFAULT_LOG_TYPE};
pub use error::{CtListError, CtListResult};
pub use key_id::{KeyId, KEY_ID_LEN};
pub use pipeline::{generate, verified_records};
pub use registry::{build_registry, convert, LogRecord, OperatorTable, Registry};
pub use source::{FileSource, LogListSource, MemorySource, SignedLogList};
pub use types::{LogEntry, LogList, Operator, OperatorId};
pub use verify::{verify_log_list, PublicKeyVerifier, SignatureVerifier, VerifiedLogList};
