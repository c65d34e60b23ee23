//! Log list → ordered, deduplicated log records.
//!
//! # Conversion Steps
//!
//! 1. Build the [`OperatorTable`] from `operators`
//! 2. For each log, in array order:
//!    resolve operator names, base64-decode the key, extract the raw key
//!    from the SPKI, compute its [`KeyId`], drop the log if it was
//!    disqualified before now, then insert it into the [`Registry`]
//! 3. Return the records sorted by `KeyId`
//!
//! Any malformed entry aborts the whole conversion; there is no partial
//! result.

use std::collections::{BTreeMap, HashMap};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::clock::Clock;
use crate::der;
use crate::error::{CtListError, CtListResult};
use crate::key_id::KeyId;
use crate::types::{LogEntry, LogList, Operator, OperatorId};

/// Separator between operator names of a jointly operated log.
pub const OPERATOR_SEPARATOR: &str = ", ";

/// Operator id → display name.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
    names: HashMap<OperatorId, String>,
}

impl OperatorTable {
    /// Build the table. A repeated id keeps the last name.
    pub fn new(operators: &[Operator]) -> Self {
        let mut names = HashMap::with_capacity(operators.len());
        for op in operators {
            if let Some(previous) = names.insert(op.id.clone(), op.name.clone()) {
                tracing::warn!(
                    operator = %op.id,
                    previous = %previous,
                    name = %op.name,
                    "duplicate operator id, keeping last"
                );
            }
        }
        Self { names }
    }

    pub fn name(&self, id: &OperatorId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Join the names of `ids` for display, failing on the first unknown id.
    pub fn joined_names(&self, ids: &[OperatorId], log: &str) -> CtListResult<String> {
        let names = ids
            .iter()
            .map(|id| {
                self.name(id).ok_or_else(|| CtListError::UnknownOperator {
                    operator: id.to_string(),
                    log: log.to_string(),
                })
            })
            .collect::<CtListResult<Vec<_>>>()?;
        Ok(names.join(OPERATOR_SEPARATOR))
    }
}

/// One validated log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub description: String,

    pub url: String,

    /// Maximum merge delay in seconds.
    pub max_merge_delay: u64,

    /// Operator display names, joined with [`OPERATOR_SEPARATOR`].
    pub operator_names: String,

    /// Key bytes from the SPKI BIT STRING.
    pub raw_key: Vec<u8>,

    pub key_id: KeyId,

    /// The log list entry this record was built from.
    pub provenance: serde_json::Value,
}

/// Records keyed by [`KeyId`].
///
/// Holds at most one record per `KeyId`. Inserting a record whose id is
/// already present replaces the earlier one, so with insertions made in
/// log-list order the later entry wins.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    records: BTreeMap<KeyId, LogRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record`, returning the record it replaced, if any.
    pub fn insert(&mut self, record: LogRecord) -> Option<LogRecord> {
        self.records.insert(record.key_id, record)
    }

    pub fn get(&self, key_id: &KeyId) -> Option<&LogRecord> {
        self.records.get(key_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending `KeyId` byte order.
    pub fn into_sorted(self) -> Vec<LogRecord> {
        self.records.into_values().collect()
    }
}

/// Convert a log list into records sorted by `KeyId`.
pub fn convert(list: &LogList, clock: &dyn Clock) -> CtListResult<Vec<LogRecord>> {
    build_registry(list, clock).map(Registry::into_sorted)
}

/// Fold every surviving log of `list` into a [`Registry`].
pub fn build_registry(list: &LogList, clock: &dyn Clock) -> CtListResult<Registry> {
    let operators = OperatorTable::new(&list.operators);
    let now = clock.now_secs();
    let mut registry = Registry::new();

    for (index, value) in list.logs.iter().enumerate() {
        let Some(record) = convert_entry(index, value, &operators, now)? else {
            continue;
        };

        let key_id = record.key_id;
        if let Some(replaced) = registry.insert(record) {
            tracing::warn!(
                key_id = %key_id,
                replaced = %replaced.description,
                index,
                "duplicate log key, keeping later entry"
            );
        }
    }

    tracing::info!(
        logs = list.logs.len(),
        kept = registry.len(),
        "converted log list"
    );
    Ok(registry)
}

/// Validate one log entry. `Ok(None)` means it was disqualified before `now`.
fn convert_entry(
    index: usize,
    value: &serde_json::Value,
    operators: &OperatorTable,
    now: i64,
) -> CtListResult<Option<LogRecord>> {
    let entry = LogEntry::from_value(index, value)?;

    let operator_names = operators.joined_names(&entry.operated_by, &entry.description)?;

    let spki = BASE64
        .decode(&entry.key)
        .map_err(|e| CtListError::Base64Decode {
            log: entry.description.clone(),
            message: e.to_string(),
        })?;

    let raw_key = der::raw_public_key(&spki).map_err(|source| CtListError::Der {
        log: entry.description.clone(),
        source,
    })?;

    let key_id = KeyId::of(&raw_key);

    // Validated before filtering: a malformed disqualified entry still fails.
    if let Some(disqualified_at) = entry.disqualified_at {
        if disqualified_at < now {
            tracing::info!(
                log = %entry.description,
                key_id = %key_id,
                disqualified_at,
                "skipping disqualified log"
            );
            return Ok(None);
        }
    }

    tracing::debug!(log = %entry.description, key_id = %key_id, "accepted log");

    Ok(Some(LogRecord {
        description: entry.description,
        url: entry.url,
        max_merge_delay: entry.maximum_merge_delay,
        operator_names,
        raw_key,
        key_id,
        provenance: value.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::der::DerError;
    use serde_json::json;

    const NOW: i64 = 1_600_000_000;

    fn spki(key: &[u8]) -> String {
        // SEQUENCE { SEQUENCE { NULL }, BIT STRING { 0, key } }
        assert!(key.len() < 100);
        let mut der = vec![0x30, (key.len() + 7) as u8, 0x30, 0x02, 0x05, 0x00];
        der.extend([0x03, (key.len() + 1) as u8, 0x00]);
        der.extend_from_slice(key);
        BASE64.encode(der)
    }

    fn log(description: &str, key: &[u8]) -> serde_json::Value {
        json!({
            "description": description,
            "url": format!("{}.example.com/", description.to_lowercase()),
            "maximum_merge_delay": 86400,
            "operated_by": [0],
            "key": spki(key),
        })
    }

    fn list(logs: Vec<serde_json::Value>) -> LogList {
        LogList {
            operators: vec![
                Operator {
                    id: OperatorId::Int(0),
                    name: "Google".to_string(),
                },
                Operator {
                    id: OperatorId::Int(1),
                    name: "Cloudflare".to_string(),
                },
            ],
            logs,
        }
    }

    #[test]
    fn test_single_log() {
        let records = convert(&list(vec![log("Argon", &[0x04, 0x01])]), &FixedClock::new(NOW))
            .unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.description, "Argon");
        assert_eq!(record.url, "argon.example.com/");
        assert_eq!(record.operator_names, "Google");
        assert_eq!(record.max_merge_delay, 86400);
        assert_eq!(record.raw_key, vec![0x04, 0x01]);
        assert_eq!(record.key_id, KeyId::of(&[0x04, 0x01]));
        assert_eq!(record.provenance["key"], json!(spki(&[0x04, 0x01])));
    }

    #[test]
    fn test_joint_operators_joined_in_order() {
        let mut entry = log("Joint", &[0x04, 0x02]);
        entry["operated_by"] = json!([1, 0]);
        let records = convert(&list(vec![entry]), &FixedClock::new(NOW)).unwrap();
        assert_eq!(records[0].operator_names, "Cloudflare, Google");
    }

    #[test]
    fn test_unknown_operator_is_fatal() {
        let mut entry = log("Orphan", &[0x04, 0x03]);
        entry["operated_by"] = json!([0, 7]);
        let err = convert(&list(vec![entry]), &FixedClock::new(NOW)).unwrap_err();
        match err {
            CtListError::UnknownOperator { operator, log } => {
                assert_eq!(operator, "7");
                assert_eq!(log, "Orphan");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_disqualification_relative_to_now() {
        let mut past = log("Past", &[0x04, 0x10]);
        past["disqualified_at"] = json!(NOW - 1);
        let mut future = log("Future", &[0x04, 0x11]);
        future["disqualified_at"] = json!(NOW + 1);
        let mut exact = log("Exact", &[0x04, 0x12]);
        exact["disqualified_at"] = json!(NOW);

        let registry =
            build_registry(&list(vec![past, future, exact]), &FixedClock::new(NOW)).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.get(&KeyId::of(&[0x04, 0x10])).is_none());
        assert!(registry.get(&KeyId::of(&[0x04, 0x11])).is_some());
        assert!(registry.get(&KeyId::of(&[0x04, 0x12])).is_some());
    }

    #[test]
    fn test_malformed_disqualified_entry_still_fails() {
        let mut entry = log("Broken", &[0x04]);
        entry["disqualified_at"] = json!(0);
        entry["key"] = json!("not base64!");
        let err = convert(&list(vec![entry]), &FixedClock::new(NOW)).unwrap_err();
        assert!(matches!(err, CtListError::Base64Decode { .. }));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let first = log("First", &[0x04, 0x20]);
        let mut second = log("Second", &[0x04, 0x20]);
        second["maximum_merge_delay"] = json!(3600);

        let records = convert(&list(vec![first, second]), &FixedClock::new(NOW)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "Second");
        assert_eq!(records[0].max_merge_delay, 3600);
    }

    #[test]
    fn test_sorted_by_key_id() {
        let logs: Vec<_> = (0u8..8)
            .map(|i| log(&format!("Log{i}"), &[0x04, i]))
            .collect();
        let records = convert(&list(logs), &FixedClock::new(NOW)).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.key_id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(records.len(), 8);
    }

    #[test]
    fn test_der_failure_propagates() {
        let mut entry = log("Trailing", &[0x04]);
        let mut der = BASE64.decode(spki(&[0x04])).unwrap();
        der.push(0xff);
        entry["key"] = json!(BASE64.encode(der));
        let err = convert(&list(vec![entry]), &FixedClock::new(NOW)).unwrap_err();
        assert!(matches!(
            err,
            CtListError::Der {
                source: DerError::TrailingData { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_bad_entry_aborts_whole_conversion() {
        let good = log("Good", &[0x04, 0x30]);
        let mut bad = log("Bad", &[0x04, 0x31]);
        bad.as_object_mut().unwrap().remove("url");
        let err = convert(&list(vec![good, bad]), &FixedClock::new(NOW)).unwrap_err();
        assert!(matches!(err, CtListError::JsonShape { .. }));
    }

    #[test]
    fn test_duplicate_operator_id_keeps_last() {
        let table = OperatorTable::new(&[
            Operator {
                id: OperatorId::Int(0),
                name: "Old".to_string(),
            },
            Operator {
                id: OperatorId::Int(0),
                name: "New".to_string(),
            },
        ]);
        assert_eq!(table.name(&OperatorId::Int(0)), Some("New"));
    }
}
