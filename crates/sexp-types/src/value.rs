//! Value types for SEXP evaluation results.
//!
//! Every value that flows through evaluation is a `SexpValue`: a tagged
//! payload (`ValueKind`) plus optional post-execution metadata (`EvalMeta`).
//! Metadata is diagnostic only — equality compares payloads and ignores it.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SexpError;

/// Reference to a game object (ship, wing, waypoint) owned by the host.
///
/// The engine never dereferences the handle; it only carries it between
/// host bridge functions. `label` is the human-readable form used when the
/// reference is coerced to text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Host-assigned identifier.
    pub id: i64,
    /// Display name (e.g. "GTC Aquitaine").
    pub label: String,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "#{}", self.id)
        } else {
            f.write_str(&self.label)
        }
    }
}

/// The payload of a value. Exactly one variant is ever active.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Number(f64),
    Text(String),
    Boolean(bool),
    /// Object reference; `None` is a null reference.
    Object(Option<ObjectRef>),
    /// No value (missing else-branch, unmatched cond, unset variable).
    Void,
    /// A failed evaluation. Never carries a usable payload of another kind.
    Error(SexpError),
}

/// Type tag for a value, used in descriptors and validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Number,
    Text,
    Boolean,
    Object,
    Void,
    Error,
}

impl ValueType {
    /// Human-readable form used in diagnostics ("convert to one of: …").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Void => "void",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic metadata attached to a value after execution.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalMeta {
    /// Name of the function that produced this value.
    pub function: String,
    /// Wall-clock time the call took.
    pub elapsed: Duration,
}

/// An immutable tagged value produced by evaluation.
///
/// Values are created by operator implementations or coercion helpers,
/// passed to the caller, and discarded — there is no shared mutable state.
/// `PartialEq` compares the payload only; two values that differ just in
/// evaluation metadata are equal.
#[derive(Debug, Clone)]
pub struct SexpValue {
    kind: ValueKind,
    meta: Option<EvalMeta>,
}

impl SexpValue {
    /// A number value.
    pub fn number(n: f64) -> Self {
        ValueKind::Number(n).into()
    }

    /// A text value.
    pub fn text(s: impl Into<String>) -> Self {
        ValueKind::Text(s.into()).into()
    }

    /// A boolean value.
    pub fn boolean(b: bool) -> Self {
        ValueKind::Boolean(b).into()
    }

    /// An object-reference value.
    pub fn object(obj: ObjectRef) -> Self {
        ValueKind::Object(Some(obj)).into()
    }

    /// A null object-reference value.
    pub fn null_object() -> Self {
        ValueKind::Object(None).into()
    }

    /// The void value.
    pub fn void() -> Self {
        ValueKind::Void.into()
    }

    /// An error value.
    pub fn error(err: SexpError) -> Self {
        ValueKind::Error(err).into()
    }

    /// The payload.
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// The type tag of the active variant.
    pub fn value_type(&self) -> ValueType {
        match &self.kind {
            ValueKind::Number(_) => ValueType::Number,
            ValueKind::Text(_) => ValueType::Text,
            ValueKind::Boolean(_) => ValueType::Boolean,
            ValueKind::Object(_) => ValueType::Object,
            ValueKind::Void => ValueType::Void,
            ValueKind::Error(_) => ValueType::Error,
        }
    }

    /// The error payload, if this is an error value.
    pub fn as_error(&self) -> Option<&SexpError> {
        match &self.kind {
            ValueKind::Error(err) => Some(err),
            _ => None,
        }
    }

    /// The text payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True if this is an error value.
    pub fn is_error(&self) -> bool {
        matches!(self.kind, ValueKind::Error(_))
    }

    /// True if this is the void value.
    pub fn is_void(&self) -> bool {
        matches!(self.kind, ValueKind::Void)
    }

    /// Evaluation metadata, if any was attached.
    pub fn meta(&self) -> Option<&EvalMeta> {
        self.meta.as_ref()
    }

    /// Return this value with evaluation metadata attached.
    ///
    /// Called by the execute path after a function returns; replaces any
    /// metadata carried over from an inner evaluation.
    pub fn with_meta(mut self, meta: EvalMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl From<ValueKind> for SexpValue {
    fn from(kind: ValueKind) -> Self {
        Self { kind, meta: None }
    }
}

// Metadata is diagnostic only; it must not affect equality.
impl PartialEq for SexpValue {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Display for SexpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::coerce::to_display_string(self))
    }
}

impl Serialize for SexpValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Delegate to value_to_json for the host-neutral {type, value} form.
        crate::json::value_to_json(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SexpValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Ok(crate::json::json_to_value(&json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_matches_variant() {
        assert_eq!(SexpValue::number(1.0).value_type(), ValueType::Number);
        assert_eq!(SexpValue::text("x").value_type(), ValueType::Text);
        assert_eq!(SexpValue::boolean(true).value_type(), ValueType::Boolean);
        assert_eq!(SexpValue::null_object().value_type(), ValueType::Object);
        assert_eq!(SexpValue::void().value_type(), ValueType::Void);
        assert_eq!(
            SexpValue::error(SexpError::runtime("boom")).value_type(),
            ValueType::Error
        );
    }

    #[test]
    fn meta_does_not_affect_equality() {
        let plain = SexpValue::number(5.0);
        let tagged = SexpValue::number(5.0).with_meta(EvalMeta {
            function: "+".into(),
            elapsed: Duration::from_micros(12),
        });
        assert_eq!(plain, tagged);
        assert!(tagged.meta().is_some());
        assert!(plain.meta().is_none());
    }

    #[test]
    fn error_accessors() {
        let err = SexpError::arithmetic("division by zero");
        let value = SexpValue::error(err.clone());
        assert!(value.is_error());
        assert_eq!(value.as_error(), Some(&err));
        assert_eq!(SexpValue::void().as_error(), None);
    }

    #[test]
    fn object_display_prefers_label() {
        assert_eq!(ObjectRef::new(7, "GTC Aquitaine").to_string(), "GTC Aquitaine");
        assert_eq!(ObjectRef::new(7, "").to_string(), "#7");
    }

    #[test]
    fn with_meta_replaces_previous() {
        let value = SexpValue::boolean(true)
            .with_meta(EvalMeta {
                function: "and".into(),
                elapsed: Duration::ZERO,
            })
            .with_meta(EvalMeta {
                function: "or".into(),
                elapsed: Duration::ZERO,
            });
        assert_eq!(value.meta().map(|m| m.function.as_str()), Some("or"));
    }
}
