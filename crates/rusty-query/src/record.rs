// File: src/record.rs
// Purpose: Describable field sets produced by #[derive(Record)]

use crate::value::Reflect;

/// Tag value that explicitly excludes a field from binding
pub const EXCLUDE_TAG: &str = "-";

/// One named field of a record and its binding tag, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub tag: Option<&'static str>,
}

impl Field {
    pub const fn new(name: &'static str, tag: Option<&'static str>) -> Self {
        Self { name, tag }
    }

    /// How this field maps onto the external store
    pub fn binding(&self) -> Binding {
        match self.tag {
            None => Binding::Unbound,
            Some("") | Some(EXCLUDE_TAG) => Binding::Excluded,
            Some(key) => Binding::Key(key),
        }
    }
}

/// Resolved state of a field's binding tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// No tag at all
    Unbound,
    /// Tagged with `"-"` (or an empty string)
    Excluded,
    /// Bound to this external key
    Key(&'static str),
}

impl Binding {
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Binding::Key(key) => Some(key),
            _ => None,
        }
    }
}

/// A struct whose fields can be enumerated and accessed at runtime.
///
/// Usually derived:
///
/// ```
/// use rusty_query::Record;
///
/// #[derive(Record, Default)]
/// struct TileParams {
///     #[query("w")]
///     width: i32,
///     #[query("max_zoom")]
///     max_zoom: Option<f64>,
///     #[query("-")]
///     internal: u8,
/// }
///
/// let params = TileParams::default();
/// assert_eq!(params.fields().len(), 3);
/// assert_eq!(params.fields()[0].tag, Some("w"));
/// ```
pub trait Record: Reflect {
    /// Field descriptors in declaration order
    fn fields(&self) -> &'static [Field];

    fn field(&self, index: usize) -> Option<&dyn Reflect>;

    /// Mutable access to a field; `None` marks the field as not writable
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_states() {
        assert_eq!(Field::new("width", None).binding(), Binding::Unbound);
        assert_eq!(Field::new("width", Some("-")).binding(), Binding::Excluded);
        assert_eq!(Field::new("width", Some("")).binding(), Binding::Excluded);
        assert_eq!(Field::new("width", Some("w")).binding(), Binding::Key("w"));
        assert_eq!(Binding::Key("w").key(), Some("w"));
        assert_eq!(Binding::Excluded.key(), None);
    }
}
