//! Host-neutral JSON form for values.
//!
//! Values cross into UI and debugging layers as `{"type": ..., "value": ...}`
//! objects. Errors serialize their kind, message, and optional hints —
//! never internal state. Malformed input deserializes to `Void` rather
//! than failing; the serialization boundary is a diagnostic surface, not a
//! validation one.

use serde_json::{json, Value as Json};

use crate::error::{ErrorKind, SexpError};
use crate::value::{ObjectRef, SexpValue, ValueKind};

/// Convert a value to its host-neutral JSON representation.
pub fn value_to_json(value: &SexpValue) -> Json {
    match value.kind() {
        ValueKind::Number(n) => json!({
            "type": "number",
            // NaN/Infinity have no JSON form; they serialize as null.
            "value": serde_json::Number::from_f64(*n).map(Json::Number).unwrap_or(Json::Null),
        }),
        ValueKind::Text(s) => json!({ "type": "text", "value": s }),
        ValueKind::Boolean(b) => json!({ "type": "boolean", "value": b }),
        ValueKind::Object(Some(obj)) => json!({
            "type": "object",
            "value": { "id": obj.id, "label": obj.label },
        }),
        ValueKind::Object(None) => json!({ "type": "object", "value": Json::Null }),
        ValueKind::Void => json!({ "type": "void" }),
        ValueKind::Error(err) => {
            let mut body = serde_json::Map::new();
            body.insert("type".into(), json!("error"));
            body.insert("kind".into(), json!(err.kind));
            body.insert("message".into(), json!(err.message));
            if let Some(context) = &err.context {
                body.insert("context".into(), json!(context));
            }
            if let Some(suggestion) = &err.suggestion {
                body.insert("suggestion".into(), json!(suggestion));
            }
            Json::Object(body)
        }
    }
}

/// Convert the host-neutral JSON representation back into a value.
///
/// Unknown type tags and malformed payloads become `Void`.
pub fn json_to_value(json: &Json) -> SexpValue {
    let Some(tag) = json.get("type").and_then(Json::as_str) else {
        return SexpValue::void();
    };
    let value = json.get("value");
    match tag {
        "number" => SexpValue::number(value.and_then(Json::as_f64).unwrap_or(0.0)),
        "text" => SexpValue::text(value.and_then(Json::as_str).unwrap_or_default()),
        "boolean" => SexpValue::boolean(value.and_then(Json::as_bool).unwrap_or(false)),
        "object" => match value {
            Some(Json::Object(obj)) => {
                let id = obj.get("id").and_then(Json::as_i64).unwrap_or(0);
                let label = obj.get("label").and_then(Json::as_str).unwrap_or_default();
                SexpValue::object(ObjectRef::new(id, label))
            }
            _ => SexpValue::null_object(),
        },
        "void" => SexpValue::void(),
        "error" => {
            let kind = json
                .get("kind")
                .and_then(|k| serde_json::from_value::<ErrorKind>(k.clone()).ok())
                .unwrap_or(ErrorKind::RuntimeError);
            let message = json
                .get("message")
                .and_then(Json::as_str)
                .unwrap_or("unknown error");
            let mut err = SexpError::new(kind, message);
            if let Some(context) = json.get("context").and_then(Json::as_str) {
                err = err.with_context(context);
            }
            if let Some(suggestion) = json.get("suggestion").and_then(Json::as_str) {
                err = err.with_suggestion(suggestion);
            }
            SexpValue::error(err)
        }
        _ => SexpValue::void(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_round_trips() {
        let value = SexpValue::number(4.5);
        assert_eq!(json_to_value(&value_to_json(&value)), value);
    }

    #[test]
    fn text_and_boolean_round_trip() {
        for value in [SexpValue::text("hello"), SexpValue::boolean(true)] {
            assert_eq!(json_to_value(&value_to_json(&value)), value);
        }
    }

    #[test]
    fn object_round_trips_with_null_form() {
        let obj = SexpValue::object(ObjectRef::new(12, "Alpha 1"));
        assert_eq!(json_to_value(&value_to_json(&obj)), obj);
        let null = SexpValue::null_object();
        assert_eq!(json_to_value(&value_to_json(&null)), null);
    }

    #[test]
    fn error_serializes_kind_and_message() {
        let err = SexpError::arithmetic("division by zero").with_suggestion("check the divisor");
        let json = value_to_json(&SexpValue::error(err.clone()));
        assert_eq!(json["type"], "error");
        assert_eq!(json["kind"], "arithmetic_error");
        assert_eq!(json["message"], "division by zero");
        assert_eq!(json["suggestion"], "check the divisor");

        let back = json_to_value(&json);
        assert_eq!(back.as_error(), Some(&err));
    }

    #[test]
    fn malformed_input_becomes_void() {
        assert!(json_to_value(&json!({"no": "type"})).is_void());
        assert!(json_to_value(&json!({"type": "mystery"})).is_void());
        assert!(json_to_value(&json!(42)).is_void());
    }

    #[test]
    fn serde_impls_delegate_to_json_form() {
        let value = SexpValue::text("mission");
        let encoded = serde_json::to_string(&value).unwrap();
        assert!(encoded.contains("\"type\":\"text\""));
        let decoded: SexpValue = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, value);
    }
}
