pub mod deserializer;
pub mod eq;
pub mod serializer;

use crate::Result;
use crate::error::TemplateError;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

pub use eq::string_equal;
pub use serializer::to_value;

/// Hierarchical data a template is rendered against.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Char(char),
    Str(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bytes(Vec<u8>),

    /// Ordered list of values (e.g. arrays, tuples)
    List(Vec<Value>),

    /// Key-value map (e.g. structs, JSON objects)
    Map(HashMap<String, Value>),
}

/// The three shapes the symbol table distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Mapping,
    Sequence,
    Scalar,
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Map(_) => Kind::Mapping,
            Value::List(_) => Kind::Sequence,
            _ => Kind::Scalar,
        }
    }

    /// Looks up `key` when this value is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(m) => m.get(key),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// The default string rendering used by `{{*name}}`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{}", c),
            Value::Str(s) => f.write_str(s),
            Value::I64(n) => write!(f, "{}", n),
            Value::U64(n) => write!(f, "{}", n),
            Value::F64(n) => write_float(f, *n),
            Value::Bytes(b) => write_joined(f, b.iter()),
            Value::List(l) => write_joined(f, l.iter()),
            Value::Map(m) => {
                let mut keys: Vec<&String> = m.keys().collect();
                keys.sort();
                f.write_str("map[")?;
                for (i, k) in keys.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}:{}", k, m[k])?;
                }
                f.write_str("]")
            }
        }
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}

/// Shortest round-trip digits, switching to exponent form (`1e+06`,
/// `1.5e-07`) when the decimal exponent is below -4 or at least 6.
fn write_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "+Inf" } else { "-Inf" });
    }
    if n == 0.0 {
        return write!(f, "{}", n);
    }
    let sci = format!("{:e}", n);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().map_err(|_| fmt::Error)?;
    if (-4..6).contains(&exp) {
        return write!(f, "{}", n);
    }
    let sign = if exp < 0 { '-' } else { '+' };
    write!(f, "{}e{}{:02}", mantissa, sign, exp.abs())
}

/// Decodes a JSON document into a `Value`. The root must be an object.
pub fn from_json(json: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| TemplateError::DecodeError(format!("couldn't unmarshal json: {}", e)))?;
    match value.kind() {
        Kind::Mapping => Ok(value),
        _ => Err(TemplateError::DecodeError(format!(
            "expected a JSON object at the root, got {:?}",
            value.kind()
        ))),
    }
}

/// Anything that can be turned into template data.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

macro_rules! impl_to_value_primitive {
    ($rust_type:ty, $variant:ident, $target:ty) => {
        impl ToValue for $rust_type {
            fn to_value(&self) -> Value {
                Value::$variant(<$target>::from(*self))
            }
        }
    };
}

impl_to_value_primitive!(bool, Bool, bool);
impl_to_value_primitive!(char, Char, char);
impl_to_value_primitive!(i8, I64, i64);
impl_to_value_primitive!(i16, I64, i64);
impl_to_value_primitive!(i32, I64, i64);
impl_to_value_primitive!(i64, I64, i64);
impl_to_value_primitive!(u8, U64, u64);
impl_to_value_primitive!(u16, U64, u64);
impl_to_value_primitive!(u32, U64, u64);
impl_to_value_primitive!(u64, U64, u64);
impl_to_value_primitive!(f32, F64, f64);
impl_to_value_primitive!(f64, F64, f64);

impl ToValue for usize {
    fn to_value(&self) -> Value {
        Value::U64(*self as u64)
    }
}

impl ToValue for isize {
    fn to_value(&self) -> Value {
        Value::I64(*self as i64)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for () {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

// Indirection layers are unwrapped here so the symbol table only ever
// classifies the three plain kinds.
impl<T> ToValue for &T
where
    T: ToValue + ?Sized,
{
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Rc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Arc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(|v| v.to_value()).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for HashMap<String, T> {
    fn to_value(&self) -> Value {
        let mut map = HashMap::with_capacity(self.len());
        for (k, v) in self {
            map.insert(k.clone(), v.to_value());
        }
        Value::Map(map)
    }
}

impl<T: ToValue> ToValue for HashMap<&str, T> {
    fn to_value(&self) -> Value {
        let mut map = HashMap::with_capacity(self.len());
        for (k, v) in self {
            map.insert(k.to_string(), v.to_value());
        }
        Value::Map(map)
    }
}
