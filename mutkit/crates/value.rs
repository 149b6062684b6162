//! Typed mutation subjects.

use std::{
    any::{type_name, Any},
    fmt::{self, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantArray};

use crate::{error::MutateError, mutations::truncate_to_room};

/// Kind of a [`Value`], without its payload.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    VariantArray,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Bytes,
    #[strum(to_string = "string", serialize = "text", serialize = "str")]
    #[serde(rename = "string", alias = "text")]
    Text,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl Kind {
    /// Smallest encoded size a value of this kind can have.
    pub const fn min_size(self) -> usize {
        match self {
            Kind::Bytes | Kind::Text => 0,
            Kind::Bool | Kind::I8 | Kind::U8 => 1,
            Kind::I16 | Kind::U16 => 2,
            Kind::I32 | Kind::U32 | Kind::F32 => 4,
            Kind::I64 | Kind::U64 | Kind::F64 => 8,
        }
    }

    /// Whether every value of this kind has the same encoded size.
    pub const fn is_fixed_size(self) -> bool {
        !matches!(self, Kind::Bytes | Kind::Text)
    }

    /// The zero value of this kind: empty for bytes and text, `false`, `0` or `0.0`.
    pub fn zero(self) -> Value {
        match self {
            Kind::Bytes => Value::Bytes(Vec::new()),
            Kind::Text => Value::Text(String::new()),
            Kind::Bool => Value::Bool(false),
            Kind::I8 => Value::I8(0),
            Kind::I16 => Value::I16(0),
            Kind::I32 => Value::I32(0),
            Kind::I64 => Value::I64(0),
            Kind::U8 => Value::U8(0),
            Kind::U16 => Value::U16(0),
            Kind::U32 => Value::U32(0),
            Kind::U64 => Value::U64(0),
            Kind::F32 => Value::F32(0.0),
            Kind::F64 => Value::F64(0.0),
        }
    }
}

/// One mutation subject. Values are identified by their position in the set handed to
/// [`Mutator::mutate`](crate::Mutator::mutate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    Bytes(Vec<u8>),
    #[serde(rename = "string", alias = "text")]
    Text(String),
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bytes(_) => Kind::Bytes,
            Value::Text(_) => Kind::Text,
            Value::Bool(_) => Kind::Bool,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
        }
    }

    /// Number of bytes this value occupies in the size budget: the payload length for bytes and
    /// text, the type width otherwise.
    pub fn encoded_size(&self) -> usize {
        match self {
            Value::Bytes(bytes) => bytes.len(),
            Value::Text(text) => text.len(),
            other => other.kind().min_size(),
        }
    }

    /// Equality on the exact payload, comparing floats by bit pattern so that `NaN` equals itself
    /// and `0.0` differs from `-0.0`.
    pub fn bit_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits(),
            (Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits(),
            (a, b) => a == b,
        }
    }

    /// Cuts a variable-size value down to `room` bytes. Fixed-size values are left alone.
    pub(crate) fn truncate_to(&mut self, room: usize) {
        match self {
            Value::Bytes(bytes) => bytes.truncate(room),
            Value::Text(text) => truncate_to_room(text, room),
            _ => {}
        }
    }

    /// Converts a type-erased value. `isize` and `usize` are widened to 64 bits, `&'static str`
    /// becomes text. Anything else is [`MutateError::UnsupportedType`].
    pub fn from_any<T: Any>(value: &T) -> Result<Self, MutateError> {
        Self::from_dyn(value)
            .ok_or_else(|| MutateError::UnsupportedType(type_name::<T>().to_owned()))
    }

    /// Like [`Value::from_any`] for callers that only hold a `&dyn Any`.
    pub fn from_dyn(value: &dyn Any) -> Option<Self> {
        macro_rules! downcast {
            ($($type:ty => $convert:expr),* $(,)?) => {
                $(
                    if let Some(value) = value.downcast_ref::<$type>() {
                        return Some($convert(value));
                    }
                )*
            };
        }

        downcast! {
            Vec<u8> => |v: &Vec<u8>| Value::Bytes(v.clone()),
            String => |v: &String| Value::Text(v.clone()),
            &'static str => |v: &&str| Value::Text((*v).to_owned()),
            bool => |v: &bool| Value::Bool(*v),
            i8 => |v: &i8| Value::I8(*v),
            i16 => |v: &i16| Value::I16(*v),
            i32 => |v: &i32| Value::I32(*v),
            i64 => |v: &i64| Value::I64(*v),
            isize => |v: &isize| Value::I64(*v as i64),
            u8 => |v: &u8| Value::U8(*v),
            u16 => |v: &u16| Value::U16(*v),
            u32 => |v: &u32| Value::U32(*v),
            u64 => |v: &u64| Value::U64(*v),
            usize => |v: &usize| Value::U64(*v as u64),
            f32 => |v: &f32| Value::F32(*v),
            f64 => |v: &f64| Value::F64(*v),
        }
        None
    }
}

/// Aggregate encoded size of a value set.
pub fn encoded_size(values: &[Value]) -> usize {
    values.iter().map(Value::encoded_size).sum()
}

macro_rules! impl_from {
    ($($type:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$type> for Value {
                fn from(value: $type) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    Vec<u8> => Bytes,
    String => Text,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

/// Renders the literal form parsed by [`Value::from_str`]: `kind:payload`, with bytes in hex.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.kind())?;
        match self {
            Value::Bytes(bytes) => write!(f, "{}", hex::encode(bytes)),
            Value::Text(text) => write!(f, "{text}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v:?}"),
            Value::F64(v) => write!(f, "{v:?}"),
        }
    }
}

/// Parses `kind:payload` literals such as `bytes:00ff`, `string:hello`, `bool:false`, `i32:-7`
/// or `f64:NaN`. An unknown kind is [`MutateError::UnsupportedType`].
impl FromStr for Value {
    type Err = MutateError;

    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let (tag, payload) = literal.split_once(':').ok_or_else(|| MutateError::InvalidLiteral {
            kind: "value",
            literal: literal.to_owned(),
            reason: "expected kind:payload".to_owned(),
        })?;
        let kind: Kind = tag.parse().map_err(|_| MutateError::UnsupportedType(tag.to_owned()))?;

        let invalid = |reason: String| MutateError::InvalidLiteral {
            kind: kind.into(),
            literal: literal.to_owned(),
            reason,
        };
        macro_rules! parse {
            ($variant:ident) => {
                payload.parse().map(Value::$variant).map_err(|err| invalid(format!("{err}")))
            };
        }

        match kind {
            Kind::Bytes => {
                hex::decode(payload).map(Value::Bytes).map_err(|err| invalid(err.to_string()))
            }
            Kind::Text => Ok(Value::Text(payload.to_owned())),
            Kind::Bool => parse!(Bool),
            Kind::I8 => parse!(I8),
            Kind::I16 => parse!(I16),
            Kind::I32 => parse!(I32),
            Kind::I64 => parse!(I64),
            Kind::U8 => parse!(U8),
            Kind::U16 => parse!(U16),
            Kind::U32 => parse!(U32),
            Kind::U64 => parse!(U64),
            Kind::F32 => parse!(F32),
            Kind::F64 => parse!(F64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_follow_the_payload() {
        assert_eq!(Value::Bytes(vec![0; 10]).encoded_size(), 10);
        assert_eq!(Value::from("héllo").encoded_size(), 6);
        assert_eq!(Value::Bool(true).encoded_size(), 1);
        assert_eq!(Value::I16(0).encoded_size(), 2);
        assert_eq!(Value::F32(0.0).encoded_size(), 4);
        assert_eq!(Value::U64(0).encoded_size(), 8);
        assert_eq!(encoded_size(&[Value::I32(1), Value::Bytes(vec![1, 2])]), 6);
    }

    #[test]
    fn zero_values_have_their_kind() {
        for kind in Kind::VARIANTS {
            let zero = kind.zero();
            assert_eq!(zero.kind(), *kind);
            assert_eq!(zero.encoded_size(), kind.min_size());
        }
    }

    #[test]
    fn literals_parse() {
        assert_eq!("bytes:00ff".parse::<Value>().unwrap(), Value::Bytes(vec![0x00, 0xff]));
        assert_eq!("string:a:b".parse::<Value>().unwrap(), Value::from("a:b"));
        assert_eq!("text:x".parse::<Value>().unwrap(), Value::from("x"));
        assert_eq!("bool:false".parse::<Value>().unwrap(), Value::Bool(false));
        assert_eq!("i32:-7".parse::<Value>().unwrap(), Value::I32(-7));
        assert_eq!("u8:255".parse::<Value>().unwrap(), Value::U8(255));
        assert!(matches!("f64:NaN".parse::<Value>().unwrap(), Value::F64(v) if v.is_nan()));
    }

    #[test]
    fn literals_render_back() {
        for literal in ["bytes:00ff", "string:hi there", "bool:true", "i8:-128", "f32:-0.0"] {
            let value: Value = literal.parse().unwrap();
            assert_eq!(value.to_string(), literal);
        }
        let value = Value::F64(f64::INFINITY);
        assert!(value.bit_eq(&value.to_string().parse().unwrap()));
    }

    #[test]
    fn unknown_kind_is_unsupported() {
        assert_eq!(
            "complex128:1".parse::<Value>().unwrap_err(),
            MutateError::UnsupportedType("complex128".to_owned())
        );
    }

    #[test]
    fn malformed_payload_is_invalid() {
        assert!(matches!(
            "u8:256".parse::<Value>().unwrap_err(),
            MutateError::InvalidLiteral { kind: "u8", .. }
        ));
        assert!(matches!(
            "bytes:0g".parse::<Value>().unwrap_err(),
            MutateError::InvalidLiteral { kind: "bytes", .. }
        ));
        assert!(matches!(
            "nocolon".parse::<Value>().unwrap_err(),
            MutateError::InvalidLiteral { .. }
        ));
    }

    #[test]
    fn any_conversion() {
        assert_eq!(Value::from_any(&vec![1u8, 2]).unwrap(), Value::Bytes(vec![1, 2]));
        assert_eq!(Value::from_any(&"hi").unwrap(), Value::from("hi"));
        assert_eq!(Value::from_any(&7usize).unwrap(), Value::U64(7));
        assert_eq!(Value::from_any(&-7isize).unwrap(), Value::I64(-7));
        assert_eq!(Value::from_any(&1.5f32).unwrap(), Value::F32(1.5));

        let err = Value::from_any(&'x').unwrap_err();
        assert_eq!(err, MutateError::UnsupportedType("char".to_owned()));
        assert!(Value::from_any(&vec![1u16]).is_err());
    }

    #[test]
    fn bit_eq_distinguishes_signed_zero() {
        assert!(!Value::F64(0.0).bit_eq(&Value::F64(-0.0)));
        assert!(Value::F64(f64::NAN).bit_eq(&Value::F64(f64::NAN)));
        assert!(!Value::F32(1.0).bit_eq(&Value::F64(1.0)));
    }

    #[test]
    fn serde_uses_kind_tags() {
        let json = serde_json::to_string(&Value::I32(5)).unwrap();
        assert_eq!(json, r#"{"kind":"i32","value":5}"#);
        let value: Value = serde_json::from_str(r#"{"kind":"string","value":"x"}"#).unwrap();
        assert_eq!(value, Value::from("x"));
    }
}
