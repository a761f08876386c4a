//! Search layer: linear-scan matching over a snapshot.
//!
//! Two modes share one predicate pipeline:
//!
//! - [`search`]: every query term must appear in its column as a
//!   case-insensitive substring. Terms combine with AND.
//! - [`search_exact`]: one field, case-sensitive equality.
//!
//! Column names are resolved to schema positions once per call. Query fields
//! the snapshot does not have are ignored: they neither fail the search nor
//! narrow it. Null cells never match. Results keep snapshot row order.

use crate::query::Query;
use crate::store::Snapshot;
use crate::types::Row;

enum Predicate {
    /// Lowercased needle, compared against the lowercased cell.
    ///
    /// Folding is `str::to_lowercase` on both sides, not uppercasing, so
    /// expansions such as `ß` → `SS` do not apply: `"ss"` does not match
    /// `Straße`.
    Contains { position: usize, needle: String },
    Equals { position: usize, value: String },
}

impl Predicate {
    fn matches(&self, row: &Row) -> bool {
        match self {
            Predicate::Contains { position, needle } => row
                .at(*position)
                .is_some_and(|v| v.to_lowercase().contains(needle.as_str())),
            Predicate::Equals { position, value } => row.at(*position) == Some(value.as_str()),
        }
    }
}

fn scan<'a>(snapshot: &'a Snapshot, predicates: &[Predicate]) -> Vec<&'a Row> {
    snapshot
        .rows()
        .iter()
        .filter(|row| predicates.iter().all(|p| p.matches(row)))
        .collect()
}

/// Rows matching every term of `query`, in snapshot order.
///
/// An empty query returns no rows. A non-empty query whose fields are all
/// missing from the schema applies no predicate and returns every row.
pub fn search<'a>(snapshot: &'a Snapshot, query: &Query) -> Vec<&'a Row> {
    if query.is_empty() {
        return Vec::new();
    }

    let predicates: Vec<Predicate> = query
        .terms()
        .filter_map(|(field, term)| match snapshot.schema().position(field) {
            Some(position) => Some(Predicate::Contains {
                position,
                needle: term.to_lowercase(),
            }),
            None => {
                tracing::debug!(field, "query field not in dataset schema, ignoring");
                None
            }
        })
        .collect();

    let matches = scan(snapshot, &predicates);
    tracing::debug!(
        terms = query.len(),
        applied = predicates.len(),
        matches = matches.len(),
        "substring search"
    );
    matches
}

/// Rows whose `field` equals `value` exactly. Unknown fields match nothing.
pub fn search_exact<'a>(snapshot: &'a Snapshot, field: &str, value: &str) -> Vec<&'a Row> {
    let Some(position) = snapshot.schema().position(field) else {
        tracing::debug!(field, "exact lookup on field not in dataset schema");
        return Vec::new();
    };
    let matches = scan(
        snapshot,
        &[Predicate::Equals {
            position,
            value: value.to_string(),
        }],
    );
    tracing::debug!(field, matches = matches.len(), "exact search");
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::FieldSet;
    use pretty_assertions::assert_eq;

    const CSV: &str = "\
name,surname,city,state
Ana,Silva,São Paulo,SP
Ana,Souza,Rio de Janeiro,RJ
Bruno,Silva,Campinas,SP
Carla,,São Paulo,
";

    fn snapshot() -> Snapshot {
        Snapshot::from_reader(CSV.as_bytes()).unwrap()
    }

    fn query(terms: &[(&str, &str)]) -> Query {
        let searchable =
            FieldSet::new("searchable_fields", ["name", "surname", "city", "state", "cpf"])
                .unwrap();
        Query::sanitize(terms.iter().copied(), &searchable).unwrap()
    }

    fn names<'a>(rows: &[&'a Row]) -> Vec<(&'a str, &'a str)> {
        rows.iter()
            .map(|r| (r.get("name").unwrap(), r.get("city").unwrap()))
            .collect()
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert!(search(&snapshot(), &Query::default()).is_empty());
    }

    #[test]
    fn substring_is_case_insensitive() {
        let snap = snapshot();
        let hits = search(&snap, &query(&[("city", "paulo")]));
        assert_eq!(names(&hits), vec![("Ana", "São Paulo"), ("Carla", "São Paulo")]);
    }

    #[test]
    fn non_ascii_case_folding() {
        let snap = snapshot();
        let hits = search(&snap, &query(&[("city", "SÃO")]));
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn terms_combine_with_and() {
        let snap = snapshot();
        let hits = search(&snap, &query(&[("name", "ana"), ("state", "sp")]));
        assert_eq!(names(&hits), vec![("Ana", "São Paulo")]);
    }

    #[test]
    fn null_cells_never_match() {
        let snap = snapshot();
        let hits = search(&snap, &query(&[("surname", "a")]));
        assert!(hits.iter().all(|r| r.get("name") != Some("Carla")));
    }

    #[test]
    fn field_missing_from_schema_is_ignored() {
        let snap = snapshot();
        let with_unknown = search(&snap, &query(&[("name", "ana"), ("cpf", "999")]));
        let without = search(&snap, &query(&[("name", "ana")]));
        assert_eq!(with_unknown, without);
    }

    #[test]
    fn only_unknown_fields_apply_no_filter() {
        let snap = snapshot();
        assert_eq!(search(&snap, &query(&[("cpf", "999")])).len(), snap.len());
    }

    #[test]
    fn term_is_not_a_pattern() {
        let snap = Snapshot::from_reader("name\nA.a\nAna\n".as_bytes()).unwrap();
        let hits = search(&snap, &query(&[("name", "a.a")]));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].get("name"), Some("A.a"));
    }

    #[test]
    fn whitespace_in_term_is_part_of_the_needle() {
        let snap = Snapshot::from_reader("name\nAna\nAna Maria\nJuliana\n".as_bytes()).unwrap();
        let hits = search(&snap, &query(&[("name", "Ana ")]));
        assert_eq!(
            hits.iter().map(|r| r.get("name").unwrap()).collect::<Vec<_>>(),
            vec!["Ana Maria"]
        );
    }

    #[test]
    fn lowercase_folding_does_not_expand_sharp_s() {
        let snap = Snapshot::from_reader("name\nStraße\n".as_bytes()).unwrap();
        assert!(search(&snap, &query(&[("name", "ss")])).is_empty());
        assert_eq!(search(&snap, &query(&[("name", "STRASSE")])).len(), 0);
        assert_eq!(search(&snap, &query(&[("name", "straß")])).len(), 1);
    }

    #[test]
    fn exact_requires_equality() {
        let snap = snapshot();
        assert_eq!(search_exact(&snap, "city", "São Paulo").len(), 2);
        assert!(search_exact(&snap, "city", "Paulo").is_empty());
        assert!(search_exact(&snap, "city", "são paulo").is_empty());
    }

    #[test]
    fn exact_on_unknown_field_matches_nothing() {
        assert!(search_exact(&snapshot(), "cpf", "123").is_empty());
    }
}
