// File: src/encode.rs
// Purpose: Extract a record's non-default tagged fields into an external store

use crate::error::{QueryError, UnsupportedType};
use crate::record::{Binding, Record};
use crate::store::QueryWriter;
use crate::value::Reflect;

/// Writes every tagged, non-default primitive field of `params` to `writer`.
///
/// A zero-valued `params` (including an empty `Option`) writes nothing and
/// succeeds. A populated `Option` is followed once. Anything that is not a
/// record after that yields [`QueryError::UnsupportedType`].
///
/// Optional fields are followed through every wrapper before the default
/// check. Fields whose underlying kind is a record, sequence or map are
/// skipped; nested records are not flattened on this side.
///
/// ```
/// use rusty_query::{create_query, Record};
/// use std::collections::BTreeMap;
///
/// #[derive(Record)]
/// struct Tile {
///     #[query("w")]
///     width: i32,
///     #[query("h")]
///     height: i32,
///     #[query("max_zoom")]
///     max_zoom: Option<f64>,
/// }
///
/// let mut out: BTreeMap<String, String> = BTreeMap::new();
/// create_query(&Tile { width: 10, height: 0, max_zoom: Some(2.4) }, &mut out).unwrap();
/// assert_eq!(out.len(), 2);
/// assert_eq!(out["w"], "10");
/// assert_eq!(out["max_zoom"], "2.4");
/// ```
pub fn create_query<W>(params: &dyn Reflect, writer: &mut W) -> Result<(), QueryError>
where
    W: QueryWriter + ?Sized,
{
    if params.is_zero() {
        return Ok(());
    }

    let target = params.pointee().unwrap_or(params);
    let type_info = target.reflect_type();
    match target.as_record() {
        Some(record) => {
            encode_record(record, writer);
            Ok(())
        }
        None => {
            tracing::debug!("Encode source {} is not a record", type_info);
            Err(UnsupportedType::new(type_info).into())
        }
    }
}

fn encode_record<W>(record: &dyn Record, writer: &mut W)
where
    W: QueryWriter + ?Sized,
{
    for (index, field) in record.fields().iter().enumerate() {
        let Some(slot) = record.field(index) else {
            continue;
        };

        let type_info = slot.reflect_type();
        let effective = type_info.effective();
        if !effective.kind.is_primitive() {
            tracing::trace!("Skipping field {}: {} is not encodable", field.name, effective);
            continue;
        }

        let Binding::Key(key) = field.binding() else {
            continue;
        };

        let value = match slot.resolved_value() {
            Some(value) if !value.is_zero() => value,
            _ => continue,
        };

        let formatted = value.to_string();
        tracing::trace!("Writing {}={}", key, formatted);
        writer.write(key, &formatted);
    }
}
