//! Request and response shapes for the `/bfhl` endpoint.

use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

/// Recognized operation keys, in dispatch-check order.
pub const OPERATION_KEYS: [&str; 5] = ["fibonacci", "prime", "lcm", "hcf", "AI"];

/// Uniform response envelope. Exactly one of `data`/`error` is present,
/// matching `is_success`; `official_email` is always present.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub is_success: bool,
    pub official_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn success(official_email: &str, data: Value) -> Self {
        Self {
            is_success: true,
            official_email: official_email.to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(official_email: &str, error: impl Into<String>) -> Self {
        Self {
            is_success: false,
            official_email: official_email.to_string(),
            data: None,
            error: Some(error.into()),
        }
    }
}

/// One request maps to exactly one of these variants.
///
/// Parsing from the raw body keeps "exactly one recognized key" a structural
/// property of the type: a successfully constructed `Operation` cannot carry
/// two operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Fibonacci(f64),
    Prime(Vec<Value>),
    Lcm(Vec<Value>),
    Hcf(Vec<Value>),
    Ai(String),
}

impl Operation {
    /// Select the single operation present in the body.
    ///
    /// Zero recognized keys enumerates all five in the error; more than one
    /// yields a generic message that does not name the conflicting keys.
    pub fn from_body(body: &Value) -> Result<Self, AppError> {
        let obj = body
            .as_object()
            .ok_or_else(|| AppError::BadRequest("Invalid request body".to_string()))?;

        let present: Vec<&str> = OPERATION_KEYS
            .iter()
            .copied()
            .filter(|key| obj.contains_key(*key))
            .collect();

        match present.as_slice() {
            [] => Err(AppError::BadRequest(format!(
                "Request must contain exactly one of: {}",
                OPERATION_KEYS.join(", ")
            ))),
            [key] => Self::parse_payload(key, &obj[*key]),
            _ => Err(AppError::BadRequest(
                "Request must contain exactly one operation key".to_string(),
            )),
        }
    }

    fn parse_payload(key: &str, payload: &Value) -> Result<Self, AppError> {
        match key {
            "fibonacci" => payload
                .as_f64()
                .map(Operation::Fibonacci)
                .ok_or_else(|| AppError::BadRequest("fibonacci must be a number".to_string())),
            "prime" => payload
                .as_array()
                .cloned()
                .map(Operation::Prime)
                .ok_or_else(|| AppError::BadRequest("prime must be an array".to_string())),
            "lcm" => payload
                .as_array()
                .cloned()
                .map(Operation::Lcm)
                .ok_or_else(|| AppError::BadRequest("lcm must be an array".to_string())),
            "hcf" => payload
                .as_array()
                .cloned()
                .map(Operation::Hcf)
                .ok_or_else(|| AppError::BadRequest("hcf must be an array".to_string())),
            "AI" => payload
                .as_str()
                .map(|s| Operation::Ai(s.to_string()))
                .ok_or_else(|| {
                    AppError::BadRequest("AI must be a string (question)".to_string())
                }),
            // `present` is filtered against OPERATION_KEYS, so this is unreachable.
            other => Err(AppError::BadRequest(format!("Unknown operation: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(err: AppError) -> String {
        err.public_message()
    }

    #[test]
    fn selects_the_single_present_operation() {
        let op = Operation::from_body(&json!({"fibonacci": 5})).unwrap();
        assert_eq!(op, Operation::Fibonacci(5.0));

        let op = Operation::from_body(&json!({"AI": "capital of France?"})).unwrap();
        assert_eq!(op, Operation::Ai("capital of France?".to_string()));
    }

    #[test]
    fn unrecognized_keys_do_not_count_as_operations() {
        let op = Operation::from_body(&json!({"hcf": [4, 6], "note": "ignored"})).unwrap();
        assert_eq!(op, Operation::Hcf(vec![json!(4), json!(6)]));
    }

    #[test]
    fn zero_keys_enumerates_all_five() {
        let err = Operation::from_body(&json!({})).unwrap_err();
        let msg = message(err);
        for key in OPERATION_KEYS {
            assert!(msg.contains(key), "missing {key} in: {msg}");
        }
    }

    #[test]
    fn multiple_keys_is_a_generic_error() {
        let err = Operation::from_body(&json!({"fibonacci": 5, "prime": [2, 3]})).unwrap_err();
        let msg = message(err);
        assert!(msg.contains("exactly one operation key"));
        // The conflicting keys are deliberately not named.
        assert!(!msg.contains("prime"));
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        for body in [json!(null), json!([1, 2]), json!("fibonacci"), json!(7)] {
            let err = Operation::from_body(&body).unwrap_err();
            assert_eq!(message(err), "Invalid request body");
        }
    }

    #[test]
    fn payload_shape_mismatches_name_the_operation() {
        let err = Operation::from_body(&json!({"fibonacci": "5"})).unwrap_err();
        assert_eq!(message(err), "fibonacci must be a number");

        let err = Operation::from_body(&json!({"prime": 7})).unwrap_err();
        assert_eq!(message(err), "prime must be an array");

        let err = Operation::from_body(&json!({"lcm": "4,6"})).unwrap_err();
        assert_eq!(message(err), "lcm must be an array");

        let err = Operation::from_body(&json!({"hcf": {"a": 1}})).unwrap_err();
        assert_eq!(message(err), "hcf must be an array");

        let err = Operation::from_body(&json!({"AI": 42})).unwrap_err();
        assert_eq!(message(err), "AI must be a string (question)");
    }

    #[test]
    fn envelope_success_omits_error() {
        let env = Envelope::success("test@bfhl.local", json!([0, 1, 1]));
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["is_success"], json!(true));
        assert_eq!(value["official_email"], json!("test@bfhl.local"));
        assert_eq!(value["data"], json!([0, 1, 1]));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn envelope_failure_omits_data() {
        let env = Envelope::failure("test@bfhl.local", "Endpoint not found");
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["is_success"], json!(false));
        assert_eq!(value["error"], json!("Endpoint not found"));
        assert!(value.get("data").is_none());
    }
}
