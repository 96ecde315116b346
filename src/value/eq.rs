use crate::value::Value;

/// Returns true if `a` and `b` would render the same in a template.
///
/// Maps and lists are compared structurally; every other pair of values is
/// compared by its default string rendering, so `123` and `"123"` are equal.
pub fn string_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Map(am), Value::Map(bm)) => {
            am.len() == bm.len()
                && am
                    .iter()
                    .all(|(k, av)| bm.get(k).is_some_and(|bv| string_equal(av, bv)))
        }
        (Value::List(al), Value::List(bl)) => {
            al.len() == bl.len() && al.iter().zip(bl).all(|(av, bv)| string_equal(av, bv))
        }
        (Value::Map(_), _) | (Value::List(_), _) => false,
        (_, Value::Map(_)) | (_, Value::List(_)) => false,
        _ => a.to_string() == b.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ToValue, from_json};
    use std::collections::HashMap;

    #[test]
    fn test_string_equal() {
        let mut inner_a = HashMap::new();
        inner_a.insert("abc", 123i64.to_value());
        let mut a = HashMap::new();
        a.insert("num", 123i32.to_value());
        a.insert("bytes", Value::Bytes(vec![0, 1, 2]));
        a.insert("map", inner_a.to_value());
        a.insert("float", 123.0f64.to_value());

        let mut inner_b = HashMap::new();
        inner_b.insert("abc", "123".to_value());
        let mut b = HashMap::new();
        b.insert("num", "123".to_value());
        b.insert("bytes", Value::Bytes(vec![0, 1, 2]));
        b.insert("map", inner_b.to_value());
        b.insert("float", 123u8.to_value());

        assert!(string_equal(&a.to_value(), &b.to_value()));
    }

    #[test]
    fn test_json_and_native_agree() {
        let json = from_json(r#"{"a": [0, 1], "b": "x"}"#).unwrap();
        let mut native = HashMap::new();
        native.insert("a", vec![0i32, 1].to_value());
        native.insert("b", "x".to_value());
        assert!(string_equal(&json, &native.to_value()));
    }

    #[test]
    fn test_shape_mismatch() {
        let list = vec![1i64].to_value();
        assert!(!string_equal(&list, &"[1]".to_value()));
        assert!(!string_equal(&vec![1i64, 2].to_value(), &list));

        let mut a = HashMap::new();
        a.insert("x", 1i64);
        let mut b = HashMap::new();
        b.insert("y", 1i64);
        assert!(!string_equal(&a.to_value(), &b.to_value()));
    }
}
