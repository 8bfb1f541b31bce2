//! Field redaction shared by the formatting adapters.

use ctxlog_ports::{FieldValue, Fields};
use ctxlog_shared::{REDACTED, is_secret_key};

/// Copy of `fields` with secret-looking keys replaced, recursively.
pub(crate) fn redacted(fields: &Fields) -> Fields {
    let mut fields = fields.clone();
    for (key, value) in &mut fields {
        if is_secret_key(key) {
            *value = FieldValue::String(REDACTED.to_string());
        } else {
            redact_value(value);
        }
    }
    fields
}

fn redact_value(value: &mut FieldValue) {
    match value {
        FieldValue::Object(map) => {
            for (key, nested) in map.iter_mut() {
                if is_secret_key(key) {
                    *nested = FieldValue::String(REDACTED.to_string());
                } else {
                    redact_value(nested);
                }
            }
        },
        FieldValue::Array(items) => {
            for item in items {
                redact_value(item);
            }
        },
        _ => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_secrets_are_replaced() {
        let mut fields = Fields::new();
        fields.insert("apiKey".into(), json!("secret"));
        fields.insert(
            "request".into(),
            json!({ "password": "nope", "items": [{ "token": "t" }], "size": 7 }), // pragma: allowlist secret
        );

        let redacted = redacted(&fields);

        assert_eq!(redacted.get("apiKey"), Some(&json!(REDACTED)));
        assert_eq!(
            redacted.get("request"),
            Some(&json!({ "password": REDACTED, "items": [{ "token": REDACTED }], "size": 7 }))
        );
        assert_eq!(fields.get("apiKey"), Some(&json!("secret")));
    }
}
