//! Statically-checked payload serialization.
//!
//! Request payloads implement [`ApiPayload`], which gives them two
//! serialized forms: a JSON body for POST/PUT and a flat query-parameter
//! mapping for GET. In both forms unset fields (`Option::None`) are omitted
//! so requests stay minimal; the remote API treats absent and null fields
//! differently.
//!
//! ```
//! use serde::Serialize;
//! use vdp_client::ApiPayload;
//!
//! #[derive(Serialize)]
//! struct PushFunds {
//!     amount: String,
//!     #[serde(rename = "merchantCategoryCode")]
//!     merchant_category_code: Option<String>,
//! }
//!
//! impl ApiPayload for PushFunds {}
//!
//! let payload = PushFunds { amount: "1.00".to_owned(), merchant_category_code: None };
//! assert_eq!(payload.to_body().unwrap(), r#"{"amount":"1.00"}"#);
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, VdpError};

/// A request payload serializable for dispatch.
///
/// Implemented per payload type (`impl ApiPayload for MyPayload {}`) on top
/// of a `serde::Serialize` derive, so the field set is checked at compile
/// time. The provided methods cover both verb-dependent wire forms.
pub trait ApiPayload: Serialize {
    /// Serializes the payload to a JSON body with unset fields omitted.
    ///
    /// # Errors
    ///
    /// Returns [`VdpError::Serialization`] if the payload cannot be
    /// serialized.
    fn to_body(&self) -> Result<String> {
        let value = prune_unset(serde_json::to_value(self)?);
        Ok(value.to_string())
    }

    /// Flattens the payload's top-level fields into query parameters.
    ///
    /// Unset fields are omitted. String fields are passed through verbatim;
    /// any other field value is rendered as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`VdpError::Serialization`] if the payload cannot be
    /// serialized, or [`VdpError::Config`] if it does not serialize to an
    /// object (a GET payload must have named fields).
    fn to_query(&self) -> Result<Vec<(String, String)>> {
        match prune_unset(serde_json::to_value(self)?) {
            Value::Object(map) => {
                Ok(map.into_iter().map(|(key, value)| (key, query_value(&value))).collect())
            }
            Value::Null => Ok(Vec::new()),
            other => Err(VdpError::Config(format!(
                "GET payload must serialize to an object, got: {other}"
            ))),
        }
    }
}

/// The empty payload, for calls that carry no data (e.g. status queries
/// addressed purely by path suffix).
impl ApiPayload for () {}

/// Recursively removes null entries from JSON objects.
///
/// Nulls inside arrays are kept: a null array element is positional data,
/// not an unset field.
pub(crate) fn prune_unset(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, prune_unset(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(prune_unset).collect()),
        other => other,
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    struct Transaction {
        amount: String,
        #[serde(rename = "systemsTraceAuditNumber")]
        systems_trace_audit_number: u32,
        comment: Option<String>,
    }

    impl ApiPayload for Transaction {}

    fn transaction() -> Transaction {
        Transaction {
            amount: "1.00".to_owned(),
            systems_trace_audit_number: 451_001,
            comment: None,
        }
    }

    #[test]
    fn body_omits_unset_fields() {
        let body = transaction().to_body().unwrap();
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value, json!({"amount": "1.00", "systemsTraceAuditNumber": 451001}));
    }

    #[test]
    fn query_flattens_top_level_fields() {
        let mut query = transaction().to_query().unwrap();
        query.sort();
        assert_eq!(
            query,
            vec![
                ("amount".to_owned(), "1.00".to_owned()),
                ("systemsTraceAuditNumber".to_owned(), "451001".to_owned()),
            ]
        );
    }

    #[test]
    fn query_rejects_non_object_payloads() {
        #[derive(Serialize)]
        struct Bare(u32);
        impl ApiPayload for Bare {}

        assert!(matches!(Bare(7).to_query().unwrap_err(), VdpError::Config(_)));
    }

    #[test]
    fn empty_payload_yields_no_query() {
        assert!(().to_query().unwrap().is_empty());
    }

    #[test]
    fn prune_removes_nested_nulls() {
        let pruned = prune_unset(json!({
            "a": null,
            "b": {"c": null, "d": 1},
            "e": [null, {"f": null}]
        }));
        assert_eq!(pruned, json!({"b": {"d": 1}, "e": [null, {}]}));
    }

    proptest::proptest! {
        #[test]
        fn prune_never_leaves_object_nulls(value in arbitrary_json(3)) {
            proptest::prop_assert!(no_object_nulls(&prune_unset(value)));
        }
    }

    fn no_object_nulls(value: &Value) -> bool {
        match value {
            Value::Object(map) => map.values().all(|v| !v.is_null() && no_object_nulls(v)),
            Value::Array(items) => items.iter().all(no_object_nulls),
            _ => true,
        }
    }

    fn arbitrary_json(depth: u32) -> impl proptest::strategy::Strategy<Value = Value> {
        use proptest::{collection, prelude::*};

        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(depth, 32, 8, |inner| {
            prop_oneof![
                collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                collection::hash_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }
}
