//! Record projection: the privacy boundary of the core.
//!
//! Only keys in the exposed field set can ever appear in an
//! [`OutputRecord`], whatever was used to find the row.

use crate::policy::FieldSet;
use crate::types::{OutputRecord, Row};

/// Reduce `row` to the exposed fields it actually has, in exposed-field
/// declaration order. Exposed fields the row lacks are omitted.
pub fn project(row: &Row, exposed: &FieldSet) -> OutputRecord {
    let mut record = OutputRecord::default();
    for field in exposed.iter() {
        if let Some(position) = row.schema().position(field) {
            record.push(field, row.at(position));
        }
    }
    record
}
