use crate::error::TemplateError;
use crate::value::Value;
use serde::Serialize;
use serde::ser::*;

use std::collections::HashMap;

/// Converts any `Serialize` type into template data.
pub fn to_value<T: ?Sized + Serialize>(value: &T) -> crate::Result<Value> {
    value.serialize(ValueSerializer)
}

pub struct ValueSerializer;

/// Generates the scalar `serialize_*` methods, widening to the `Value` variant.
macro_rules! serialize_scalars {
    ($($method:ident($ty:ty) => $variant:ident($conv:expr)),* $(,)?) => {
        $(
            fn $method(self, v: $ty) -> Result<Self::Ok, Self::Error> {
                Ok(Value::$variant($conv(v)))
            }
        )*
    };
}

impl Serializer for ValueSerializer {
    type Ok = Value;
    type Error = TemplateError;
    type SerializeSeq = ListSerializer;
    type SerializeTuple = ListSerializer;
    type SerializeTupleStruct = ListSerializer;
    type SerializeTupleVariant = ListSerializer;
    type SerializeMap = MapSerializer;
    type SerializeStruct = MapSerializer;
    type SerializeStructVariant = MapSerializer;

    serialize_scalars! {
        serialize_bool(bool) => Bool(bool::from),
        serialize_i8(i8) => I64(i64::from),
        serialize_i16(i16) => I64(i64::from),
        serialize_i32(i32) => I64(i64::from),
        serialize_i64(i64) => I64(i64::from),
        serialize_u8(u8) => U64(u64::from),
        serialize_u16(u16) => U64(u64::from),
        serialize_u32(u32) => U64(u64::from),
        serialize_u64(u64) => U64(u64::from),
        serialize_f32(f32) => F64(f64::from),
        serialize_f64(f64) => F64(f64::from),
        serialize_char(char) => Char(char::from),
        serialize_str(&str) => Str(str::to_string),
        serialize_bytes(&[u8]) => Bytes(<[u8]>::to_vec),
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        Ok(Value::Null)
    }
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }
    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Ok(Value::Null)
    }
    fn serialize_unit_struct(self, _: &'static str) -> Result<Self::Ok, Self::Error> {
        Ok(Value::Null)
    }
    // Enum variants lose their tag: a unit variant prints as its name, the
    // others render as their payload.
    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        Ok(Value::Str(variant.to_string()))
    }
    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }
    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Ok(ListSerializer(Vec::with_capacity(len.unwrap_or(0))))
    }
    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        self.serialize_seq(Some(len))
    }
    fn serialize_tuple_struct(
        self,
        _: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        self.serialize_seq(Some(len))
    }
    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        self.serialize_seq(Some(len))
    }
    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(MapSerializer::with_capacity(len.unwrap_or(0)))
    }
    fn serialize_struct(
        self,
        _: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        self.serialize_map(Some(len))
    }
    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        self.serialize_map(Some(len))
    }
}

pub struct ListSerializer(Vec<Value>);

macro_rules! impl_serialize_seq {
    ($trait:ident, $method:ident) => {
        impl $trait for ListSerializer {
            type Ok = Value;
            type Error = TemplateError;

            fn $method<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
                self.0.push(value.serialize(ValueSerializer)?);
                Ok(())
            }

            fn end(self) -> Result<Self::Ok, Self::Error> {
                Ok(Value::List(self.0))
            }
        }
    };
}

impl_serialize_seq!(SerializeSeq, serialize_element);
impl_serialize_seq!(SerializeTuple, serialize_element);
impl_serialize_seq!(SerializeTupleStruct, serialize_field);
impl_serialize_seq!(SerializeTupleVariant, serialize_field);

pub struct MapSerializer {
    map: HashMap<String, Value>,
    key: Option<String>,
}

impl MapSerializer {
    fn with_capacity(len: usize) -> Self {
        Self {
            map: HashMap::with_capacity(len),
            key: None,
        }
    }
}

impl SerializeMap for MapSerializer {
    type Ok = Value;
    type Error = TemplateError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), Self::Error> {
        // Scalar keys are accepted the way they would print.
        match key.serialize(ValueSerializer)? {
            Value::Map(_) | Value::List(_) | Value::Bytes(_) => Err(TemplateError::SerializationError(
                "Map key must be a scalar".to_string(),
            )),
            k => {
                self.key = Some(k.to_string());
                Ok(())
            }
        }
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        let v = value.serialize(ValueSerializer)?;
        let key = self
            .key
            .take()
            .ok_or_else(|| TemplateError::SerializationError("Missing key for value".to_string()))?;
        self.map.insert(key, v);
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(Value::Map(self.map))
    }
}

macro_rules! impl_serialize_struct {
    ($trait:ident) => {
        impl $trait for MapSerializer {
            type Ok = Value;
            type Error = TemplateError;

            fn serialize_field<T: ?Sized + Serialize>(
                &mut self,
                key: &'static str,
                value: &T,
            ) -> Result<(), Self::Error> {
                let v = value.serialize(ValueSerializer)?;
                self.map.insert(key.to_string(), v);
                Ok(())
            }

            fn end(self) -> Result<Self::Ok, Self::Error> {
                Ok(Value::Map(self.map))
            }
        }
    };
}

impl_serialize_struct!(SerializeStruct);
impl_serialize_struct!(SerializeStructVariant);

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Item {
        name: &'static str,
        tags: Vec<&'static str>,
        price: Option<f64>,
    }

    #[test]
    fn test_struct_becomes_map() {
        let item = Item {
            name: "pen",
            tags: vec!["blue", "cheap"],
            price: None,
        };
        let value = to_value(&item).unwrap();
        assert_eq!(value.get("name"), Some(&Value::Str("pen".to_string())));
        assert_eq!(
            value.get("tags"),
            Some(&Value::List(vec![
                Value::Str("blue".to_string()),
                Value::Str("cheap".to_string())
            ]))
        );
        assert_eq!(value.get("price"), Some(&Value::Null));
    }

    #[test]
    fn test_tuple_becomes_list() {
        let value = to_value(&(1, "hello")).unwrap();
        assert_eq!(
            value,
            Value::List(vec![Value::I64(1), Value::Str("hello".to_string())])
        );
    }

    #[test]
    fn test_integer_map_keys_are_stringified() {
        let mut m = std::collections::BTreeMap::new();
        m.insert(7u32, "seven");
        let value = to_value(&m).unwrap();
        assert_eq!(value.get("7"), Some(&Value::Str("seven".to_string())));
    }

    #[derive(Serialize)]
    enum Status {
        Open,
        Held(u8),
    }

    #[test]
    fn test_enum_variants_render_untagged() {
        assert_eq!(to_value(&Status::Open).unwrap(), Value::Str("Open".to_string()));
        assert_eq!(to_value(&Status::Held(3)).unwrap(), Value::U64(3));
        assert_eq!(to_value(&[b'a', b'b'][..]).unwrap().to_string(), "[97 98]");
    }
}
