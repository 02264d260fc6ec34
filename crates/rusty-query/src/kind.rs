// File: src/kind.rs
// Purpose: Runtime type descriptors used by the coercer and both traversals

use std::fmt;

/// Closed set of value kinds the engine distinguishes.
///
/// Primitive kinds are the only ones a string can be coerced into. `Optional`
/// wraps another kind; `Record`, `Sequence` and `Map` are structural kinds that
/// are traversed (records, on decode) or skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    /// Native-width signed integer (`isize`)
    Isize,
    I8,
    I16,
    I32,
    I64,
    /// Native-width unsigned integer (`usize`)
    Usize,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Str,
    /// Nullable wrapper around exactly one element type (`Option<T>`)
    Optional,
    /// A struct-like type with named, tagged fields
    Record,
    /// Dynamically or statically sized list (`Vec<T>`, `[T; N]`, ...)
    Sequence,
    /// Key/value container (`HashMap`, `BTreeMap`)
    Map,
}

impl Kind {
    /// Whether a string can be coerced directly into this kind
    pub fn is_primitive(self) -> bool {
        !matches!(
            self,
            Kind::Optional | Kind::Record | Kind::Sequence | Kind::Map
        )
    }

    /// Whether the kind is a signed or unsigned integer
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Kind::Isize
                | Kind::I8
                | Kind::I16
                | Kind::I32
                | Kind::I64
                | Kind::Usize
                | Kind::U8
                | Kind::U16
                | Kind::U32
                | Kind::U64
        )
    }

    /// Bit width of integer and float kinds
    pub fn bits(self) -> Option<u32> {
        match self {
            Kind::I8 | Kind::U8 => Some(8),
            Kind::I16 | Kind::U16 => Some(16),
            Kind::I32 | Kind::U32 | Kind::F32 => Some(32),
            Kind::I64 | Kind::U64 | Kind::F64 => Some(64),
            Kind::Isize => Some(isize::BITS),
            Kind::Usize => Some(usize::BITS),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Isize => "isize",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Usize => "usize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Str => "string",
            Kind::Optional => "optional",
            Kind::Record => "record",
            Kind::Sequence => "sequence",
            Kind::Map => "map",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes a Rust type at runtime: its name, its kind and, for optional
/// wrappers, the wrapped element type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub name: &'static str,
    pub kind: Kind,
    pub elem: Option<Box<TypeInfo>>,
}

impl TypeInfo {
    /// Descriptor for a type without an element
    pub fn new(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            elem: None,
        }
    }

    /// Descriptor for an optional wrapper around `elem`
    pub fn optional(name: &'static str, elem: TypeInfo) -> Self {
        Self {
            name,
            kind: Kind::Optional,
            elem: Some(Box::new(elem)),
        }
    }

    /// Follows every optional wrapper down to the underlying type.
    ///
    /// `Option<Option<i32>>` resolves to the descriptor of `i32`.
    pub fn effective(&self) -> &TypeInfo {
        let mut current = self;
        while let (Kind::Optional, Some(elem)) = (current.kind, current.elem.as_deref()) {
            current = elem;
        }
        current
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
