// File: src/decode.rs
// Purpose: Fill a record's tagged fields from an external lookup

use crate::coerce::coerce;
use crate::error::{QueryError, UnsupportedType};
use crate::kind::Kind;
use crate::record::{Binding, Record};
use crate::store::QueryLookup;
use crate::value::Reflect;

/// Fills the tagged fields of `params` from `lookup`.
///
/// `params` must be a record, or a populated `Option` holding one; an empty
/// `Option` has nowhere to write and yields [`QueryError::NonPointer`].
///
/// Fields are visited in declaration order. Nested records are decoded in
/// place using the same lookup keys. Missing or empty values leave a field
/// untouched, so values set before the call act as defaults. The first value
/// that fails to coerce aborts the call; fields decoded before it keep their
/// new values.
///
/// ```
/// use rusty_query::{parse_query, Record};
/// use std::collections::HashMap;
///
/// #[derive(Record, Default)]
/// struct Size {
///     #[query("w")]
///     width: i32,
///     #[query("h")]
///     height: i32,
/// }
///
/// let lookup = HashMap::from([("w".to_string(), "10".to_string())]);
/// let mut size = Size { width: 1, height: 2 };
/// parse_query(&lookup, &mut size).unwrap();
/// assert_eq!((size.width, size.height), (10, 2));
/// ```
pub fn parse_query<L>(lookup: &L, params: &mut dyn Reflect) -> Result<(), QueryError>
where
    L: QueryLookup + ?Sized,
{
    let target: &mut dyn Reflect = if params.reflect_type().kind == Kind::Optional {
        match params.pointee_mut() {
            Some(inner) => inner,
            None => {
                tracing::debug!("Refusing to decode into an empty optional target");
                return Err(QueryError::NonPointer);
            }
        }
    } else {
        params
    };

    let type_info = target.reflect_type();
    match target.as_record_mut() {
        Some(record) => decode_record(lookup, record),
        None => {
            tracing::debug!("Decode target {} is not a record", type_info);
            Err(UnsupportedType::new(type_info).into())
        }
    }
}

/// Statically typed form of [`parse_query`]
pub fn parse_query_into<L, R>(lookup: &L, params: &mut R) -> Result<(), QueryError>
where
    L: QueryLookup + ?Sized,
    R: Record,
{
    decode_record(lookup, params)
}

fn decode_record<L>(lookup: &L, record: &mut dyn Record) -> Result<(), QueryError>
where
    L: QueryLookup + ?Sized,
{
    let fields = record.fields();

    for (index, field) in fields.iter().enumerate() {
        let is_record = record
            .field(index)
            .is_some_and(|slot| slot.as_record().is_some());
        if is_record {
            // A nested record that cannot be written has nothing to fill
            match record.field_mut(index).and_then(|slot| slot.as_record_mut()) {
                Some(nested) => {
                    tracing::trace!("Descending into nested record {}", field.name);
                    decode_record(lookup, nested)?;
                }
                None => tracing::trace!("Skipping nested record {}: not writable", field.name),
            }
            continue;
        }

        let Some(slot) = record.field_mut(index) else {
            tracing::trace!("Skipping field {}: not writable", field.name);
            continue;
        };

        let key = match field.binding() {
            Binding::Key(key) => key,
            Binding::Unbound | Binding::Excluded => {
                tracing::trace!("Skipping field {}: no binding", field.name);
                continue;
            }
        };

        let raw = match lookup.lookup(key) {
            Some(raw) if !raw.is_empty() => raw,
            _ => continue,
        };

        let type_info = slot.reflect_type();
        coerce(&raw, &type_info)
            .and_then(|value| slot.set_value(value))
            .map_err(|source| {
                tracing::debug!("Failed to set {} from {}={:?}: {}", field.name, key, raw, source);
                QueryError::SetValue {
                    key: key.to_string(),
                    source,
                }
            })?;
        tracing::trace!("Set {} from {}", field.name, key);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoerceError;
    use crate::kind::TypeInfo;
    use crate::record::Field;
    use crate::value::Value;
    use std::collections::HashMap;

    #[derive(Debug, Default, PartialEq, crate::Record)]
    struct Size {
        #[query("w")]
        width: i32,
    }

    /// Hand-written record that can hide its fields from writes
    #[derive(Debug, Default)]
    struct Sealed {
        size: Size,
        height: i32,
        writable: bool,
    }

    impl Reflect for Sealed {
        fn type_info() -> TypeInfo {
            TypeInfo::new("Sealed", Kind::Record)
        }

        fn reflect_type(&self) -> TypeInfo {
            <Self as Reflect>::type_info()
        }

        fn from_value(_value: Value) -> Result<Self, CoerceError> {
            Err(UnsupportedType::new(<Self as Reflect>::type_info()).into())
        }

        fn set_value(&mut self, _value: Value) -> Result<(), CoerceError> {
            Err(UnsupportedType::new(self.reflect_type()).into())
        }

        fn resolved_value(&self) -> Option<Value> {
            None
        }

        fn is_zero(&self) -> bool {
            self.size.is_zero() && self.height == 0
        }

        fn as_record(&self) -> Option<&dyn Record> {
            Some(self)
        }

        fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
            Some(self)
        }
    }

    impl Record for Sealed {
        fn fields(&self) -> &'static [Field] {
            const FIELDS: &[Field] = &[Field::new("size", None), Field::new("height", Some("h"))];
            FIELDS
        }

        fn field(&self, index: usize) -> Option<&dyn Reflect> {
            match index {
                0 => Some(&self.size),
                1 => Some(&self.height),
                _ => None,
            }
        }

        fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
            if !self.writable {
                return None;
            }
            match index {
                0 => Some(&mut self.size),
                1 => Some(&mut self.height),
                _ => None,
            }
        }
    }

    fn lookup(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_writable_hand_written_record_descends() {
        let mut sealed = Sealed {
            writable: true,
            ..Sealed::default()
        };
        parse_query(&lookup(&[("w", "10"), ("h", "5")]), &mut sealed).unwrap();
        assert_eq!(sealed.size.width, 10);
        assert_eq!(sealed.height, 5);
    }

    #[test]
    fn test_unwritable_fields_are_skipped() {
        let mut sealed = Sealed::default();
        parse_query(&lookup(&[("w", "10"), ("h", "5")]), &mut sealed).unwrap();
        assert_eq!(sealed.size, Size::default());
        assert_eq!(sealed.height, 0);

        // values behind unwritable fields are never coerced
        parse_query(&lookup(&[("w", "wide"), ("h", "tall")]), &mut sealed).unwrap();
    }
}
