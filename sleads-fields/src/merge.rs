//! Field reconciliation.

use sleads_types::Field;

/// Reconciles a previous field collection with a freshly produced one.
///
/// With no previous collection the incoming fields are returned as-is.
/// Otherwise each incoming field replaces the same-id entry in place,
/// preserving its position, or is appended when the id is new. The result
/// holds the union of ids: ids only in `previous` keep their prior value,
/// ids in `incoming` always reflect the newest value, pre-existing ids
/// keep their relative order and new ids are appended in incoming order.
#[must_use]
pub fn merge(previous: Option<Vec<Field>>, incoming: Vec<Field>) -> Vec<Field> {
    let Some(mut merged) = previous else {
        return incoming;
    };
    for field in dedup_last_wins(incoming) {
        match merged.iter().position(|f| f.id == field.id) {
            Some(index) => merged[index] = field,
            None => merged.push(field),
        }
    }
    merged
}

/// Collapses duplicate ids to their last value while keeping the position
/// of the first occurrence, the insertion-order behavior of a map keyed
/// by id.
fn dedup_last_wins(fields: Vec<Field>) -> Vec<Field> {
    let mut deduped: Vec<Field> = Vec::with_capacity(fields.len());
    for field in fields {
        match deduped.iter().position(|f| f.id == field.id) {
            Some(index) => deduped[index] = field,
            None => deduped.push(field),
        }
    }
    deduped
}
