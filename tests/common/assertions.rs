//! Domain-specific assertion macros for regsearch harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! privacy or envelope invariant was violated.

// ---------------------------------------------------------------------------
// Projection assertions
// ---------------------------------------------------------------------------

/// Assert that every record in `$records` only carries keys from `$exposed`.
///
/// ```rust
/// assert_redacted!(records, ["name", "city"]);
/// ```
#[macro_export]
macro_rules! assert_redacted {
    ($records:expr, $exposed:expr) => {{
        let exposed: &[&str] = &$exposed;
        for (i, record) in $records.iter().enumerate() {
            let record: &regsearch_core::OutputRecord = record;
            for key in record.keys() {
                if !exposed.contains(&key) {
                    panic!(
                        "assert_redacted! failed: record {} leaks field {:?}.\n  exposed: {:?}\n  keys:    {:?}",
                        i,
                        key,
                        exposed,
                        record.keys().collect::<Vec<_>>()
                    );
                }
            }
        }
    }};
}

/// Assert the `name` column of each record, in order.
///
/// ```rust
/// assert_names!(records, ["Ana", "Pedro"]);
/// ```
#[macro_export]
macro_rules! assert_names {
    ($records:expr, $names:expr) => {{
        let expected: Vec<&str> = $names.to_vec();
        let actual: Vec<&str> = $records
            .iter()
            .map(|r: &regsearch_core::OutputRecord| r.get("name").flatten().unwrap_or("<none>"))
            .collect();
        pretty_assertions::assert_eq!(actual, expected, "assert_names! failed");
    }};
}

// ---------------------------------------------------------------------------
// Envelope assertions
// ---------------------------------------------------------------------------

/// Assert the `status` and `count` of a JSON envelope, and that `count`
/// matches the length of `results`.
///
/// ```rust
/// assert_envelope!(body, "success", 2);
/// ```
#[macro_export]
macro_rules! assert_envelope {
    ($body:expr, $status:expr, $count:expr) => {{
        let body: &serde_json::Value = &$body;
        let results = body["results"].as_array().unwrap_or_else(|| {
            panic!("assert_envelope! failed: `results` is not an array.\n  body: {}", body)
        });
        pretty_assertions::assert_eq!(body["status"], $status, "status mismatch in {}", body);
        pretty_assertions::assert_eq!(body["count"], $count, "count mismatch in {}", body);
        pretty_assertions::assert_eq!(
            results.len(),
            $count as usize,
            "count != results.len() in {}",
            body
        );
    }};
}
