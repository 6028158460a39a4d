//! Canonical JSON encoding of headers and claim sets.
//!
//! The output is compact (no insignificant whitespace), keeps map keys in insertion order and
//! escapes strings the way `serde_json` does (forward slashes are left as is). These bytes are
//! what gets signed, so the form must stay fixed.
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerializeError {
    #[error("unable to serialize json: `{0}`")]
    Json(#[from] serde_json::Error),
}

/// Serializes `value` into its canonical JSON bytes.
pub fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, SerializeError> {
    Ok(serde_json::to_vec(value)?)
}

#[cfg(test)]
mod test {
    use serde_json::{Map, Value, json};

    use super::to_bytes;

    #[test]
    fn output_is_compact() {
        let bytes = to_bytes(&json!({"sub": "user-42", "admin": true})).unwrap();
        assert_eq!(bytes, br#"{"sub":"user-42","admin":true}"#);
    }

    #[test]
    fn keys_keep_insertion_order() {
        let mut map = Map::new();
        map.insert("zeta".into(), Value::from(1));
        map.insert("alpha".into(), Value::from(2));
        map.insert("mid".into(), Value::from(3));
        assert_eq!(to_bytes(&map).unwrap(), br#"{"zeta":1,"alpha":2,"mid":3}"#);
    }

    #[test]
    fn strings_are_escaped() {
        let bytes = to_bytes(&json!({"q": "a \"quoted\"\nline", "url": "https://a/b"})).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"q":"a \"quoted\"\nline","url":"https://a/b"}"#
        );
    }

    #[test]
    fn same_value_same_bytes() {
        let value = json!({"iss": "issuer.example", "nested": {"roles": ["a", "b"], "n": null}});
        assert_eq!(to_bytes(&value).unwrap(), to_bytes(&value.clone()).unwrap());
    }
}
