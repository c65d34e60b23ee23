//! Fetch → verify → convert → emit.

use crate::clock::Clock;
use crate::emit::{self, EmitOptions};
use crate::error::CtListResult;
use crate::registry::{self, LogRecord};
use crate::source::LogListSource;
use crate::verify::{verify_log_list, SignatureVerifier};

/// Verify and convert the log list, returning records in emission order.
pub fn verified_records(
    source: &dyn LogListSource,
    verifier: &dyn SignatureVerifier,
    clock: &dyn Clock,
) -> CtListResult<Vec<LogRecord>> {
    let verified = verify_log_list(source, verifier)?;
    let list = verified.parse()?;
    registry::convert(&list, clock)
}

/// Produce the generated source for the log list.
///
/// The artifact is rendered entirely in memory; an error at any stage
/// means nothing is returned.
pub fn generate(
    source: &dyn LogListSource,
    verifier: &dyn SignatureVerifier,
    clock: &dyn Clock,
    options: &EmitOptions,
) -> CtListResult<String> {
    let records = verified_records(source, verifier, clock)?;
    Ok(emit::render(&records, options))
}
