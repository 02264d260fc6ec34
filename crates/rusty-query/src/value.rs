// File: src/value.rs
// Purpose: Coerced values and the per-type reflection capability

use crate::error::{CoerceError, UnsupportedType};
use crate::kind::{Kind, TypeInfo};
use crate::record::Record;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

/// A single coerced value.
///
/// Produced by [`coerce`](crate::coerce) on decode and by
/// [`Reflect::resolved_value`] on encode.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Isize(isize),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Usize(usize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
    /// A freshly allocated optional holding the inner value
    Optional(Box<Value>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Isize(_) => Kind::Isize,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::Usize(_) => Kind::Usize,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::Str(_) => Kind::Str,
            Value::Optional(_) => Kind::Optional,
        }
    }

    /// Whether this is the default value of its type.
    ///
    /// Floats are zero only when every bit is zero, so `-0.0` counts as set.
    /// A present optional is never zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Bool(v) => !v,
            Value::Isize(v) => *v == 0,
            Value::I8(v) => *v == 0,
            Value::I16(v) => *v == 0,
            Value::I32(v) => *v == 0,
            Value::I64(v) => *v == 0,
            Value::Usize(v) => *v == 0,
            Value::U8(v) => *v == 0,
            Value::U16(v) => *v == 0,
            Value::U32(v) => *v == 0,
            Value::U64(v) => *v == 0,
            Value::F32(v) => v.to_bits() == 0,
            Value::F64(v) => v.to_bits() == 0,
            Value::Str(v) => v.is_empty(),
            Value::Optional(_) => false,
        }
    }
}

/// Natural textual form, as written by encode.
///
/// Floats print in Rust's shortest round-trip notation without an exponent
/// (`1e21` becomes `1000000000000000000000`, infinity becomes `inf`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => v.fmt(f),
            Value::Isize(v) => v.fmt(f),
            Value::I8(v) => v.fmt(f),
            Value::I16(v) => v.fmt(f),
            Value::I32(v) => v.fmt(f),
            Value::I64(v) => v.fmt(f),
            Value::Usize(v) => v.fmt(f),
            Value::U8(v) => v.fmt(f),
            Value::U16(v) => v.fmt(f),
            Value::U32(v) => v.fmt(f),
            Value::U64(v) => v.fmt(f),
            Value::F32(v) => v.fmt(f),
            Value::F64(v) => v.fmt(f),
            Value::Str(v) => f.write_str(v),
            Value::Optional(inner) => inner.fmt(f),
        }
    }
}

/// Runtime view of a field type.
///
/// Implemented here for every primitive, `String`, `Option<T>` and the
/// container types; `#[derive(Record)]` implements it for records.
pub trait Reflect {
    /// Static descriptor of the implementing type
    fn type_info() -> TypeInfo
    where
        Self: Sized;

    /// Descriptor of this value's type, usable through `dyn Reflect`
    fn reflect_type(&self) -> TypeInfo;

    /// Builds an instance from a coerced value of the matching shape
    fn from_value(value: Value) -> Result<Self, CoerceError>
    where
        Self: Sized;

    /// Replaces `self` with a coerced value
    fn set_value(&mut self, value: Value) -> Result<(), CoerceError>;

    /// The primitive value after following every optional wrapper.
    ///
    /// `None` when a wrapper along the chain is empty or the type has no
    /// primitive representation.
    fn resolved_value(&self) -> Option<Value>;

    fn is_zero(&self) -> bool;

    /// The wrapped value of a populated optional
    fn pointee(&self) -> Option<&dyn Reflect> {
        None
    }

    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
        None
    }

    fn as_record(&self) -> Option<&dyn Record> {
        None
    }

    fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        None
    }
}

fn mismatch<T: Reflect>() -> CoerceError {
    UnsupportedType::new(T::type_info()).into()
}

macro_rules! impl_reflect_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::new(stringify!($ty), Kind::$variant)
                }

                fn reflect_type(&self) -> TypeInfo {
                    <Self as Reflect>::type_info()
                }

                fn from_value(value: Value) -> Result<Self, CoerceError> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        _ => Err(mismatch::<Self>()),
                    }
                }

                fn set_value(&mut self, value: Value) -> Result<(), CoerceError> {
                    *self = <Self as Reflect>::from_value(value)?;
                    Ok(())
                }

                fn resolved_value(&self) -> Option<Value> {
                    Some(Value::$variant(self.clone()))
                }

                fn is_zero(&self) -> bool {
                    *self == <$ty>::default()
                }
            }
        )*
    };
}

impl_reflect_primitive! {
    bool => Bool,
    isize => Isize,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    usize => Usize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    String => Str,
}

// Floats compare bitwise so that -0.0 is not mistaken for the default.
macro_rules! impl_reflect_float {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::new(stringify!($ty), Kind::$variant)
                }

                fn reflect_type(&self) -> TypeInfo {
                    <Self as Reflect>::type_info()
                }

                fn from_value(value: Value) -> Result<Self, CoerceError> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        _ => Err(mismatch::<Self>()),
                    }
                }

                fn set_value(&mut self, value: Value) -> Result<(), CoerceError> {
                    *self = <Self as Reflect>::from_value(value)?;
                    Ok(())
                }

                fn resolved_value(&self) -> Option<Value> {
                    Some(Value::$variant(*self))
                }

                fn is_zero(&self) -> bool {
                    self.to_bits() == 0
                }
            }
        )*
    };
}

impl_reflect_float! {
    f32 => F32,
    f64 => F64,
}

impl<T: Reflect> Reflect for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::optional(std::any::type_name::<Self>(), T::type_info())
    }

    fn reflect_type(&self) -> TypeInfo {
        <Self as Reflect>::type_info()
    }

    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::Optional(inner) => Ok(Some(T::from_value(*inner)?)),
            _ => Err(mismatch::<Self>()),
        }
    }

    fn set_value(&mut self, value: Value) -> Result<(), CoerceError> {
        *self = <Self as Reflect>::from_value(value)?;
        Ok(())
    }

    fn resolved_value(&self) -> Option<Value> {
        self.as_ref().and_then(Reflect::resolved_value)
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn pointee(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|inner| inner as &dyn Reflect)
    }

    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|inner| inner as &mut dyn Reflect)
    }
}

// Containers are never coerced into and never encoded.
macro_rules! impl_reflect_unsupported {
    ($kind:ident, $is_zero:expr) => {
        fn type_info() -> TypeInfo {
            TypeInfo::new(std::any::type_name::<Self>(), Kind::$kind)
        }

        fn reflect_type(&self) -> TypeInfo {
            <Self as Reflect>::type_info()
        }

        fn from_value(_value: Value) -> Result<Self, CoerceError> {
            Err(mismatch::<Self>())
        }

        fn set_value(&mut self, _value: Value) -> Result<(), CoerceError> {
            Err(mismatch::<Self>())
        }

        fn resolved_value(&self) -> Option<Value> {
            None
        }

        fn is_zero(&self) -> bool {
            let is_zero: fn(&Self) -> bool = $is_zero;
            is_zero(self)
        }
    };
}

impl<T> Reflect for Vec<T> {
    impl_reflect_unsupported!(Sequence, |v| v.is_empty());
}

impl<T> Reflect for VecDeque<T> {
    impl_reflect_unsupported!(Sequence, |v| v.is_empty());
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    impl_reflect_unsupported!(Sequence, |v| v.iter().all(T::is_zero));
}

impl<K, V, S> Reflect for HashMap<K, V, S> {
    impl_reflect_unsupported!(Map, |v| v.is_empty());
}

impl<K, V> Reflect for BTreeMap<K, V> {
    impl_reflect_unsupported!(Map, |v| v.is_empty());
}
