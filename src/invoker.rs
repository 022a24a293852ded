//! The Structured Prompt Invoker.
//!
//! One generic function does the work every flow shares: validate the input
//! record, render the prompt, make one call to the generation service, and
//! validate the response against the declared output shape. The invoker keeps
//! no state between calls and never caches, deduplicates, or retries.

use serde_json::Value;

use crate::core::flow::FlowDefinition;
use crate::core::record::Record;
use crate::core::shape::{FieldType, Violation};
use crate::error::InvocationError;
use crate::llm::GenerationService;

/// Invokes flows against a generation service.
///
/// Generic over [`GenerationService`] so the real [`Client`](crate::llm::Client)
/// and test doubles plug in the same way.
pub struct Invoker<S> {
    service: S,
}

impl<S: GenerationService> Invoker<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// The underlying generation service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Run one flow invocation.
    ///
    /// The input is checked against the flow's input shape before anything
    /// else; a violation fails fast without touching the network. On success
    /// the returned record satisfies the flow's output shape, in declared
    /// field order. A response the service returns that cannot be coerced
    /// into that shape fails with
    /// [`InvocationError::SchemaValidation`] rather than producing a
    /// best-effort partial record.
    pub async fn invoke(
        &self,
        flow: &FlowDefinition,
        input: &Record,
    ) -> Result<Record, InvocationError> {
        flow.input
            .validate(input)
            .map_err(InvocationError::SchemaValidation)?;

        let prompt = build_prompt(flow, input);
        log::debug!("invoking flow '{}' ({} prompt bytes)", flow.name, prompt.len());

        let raw = self.service.generate(&prompt).await?;

        let record = parse_output(flow, &raw).map_err(InvocationError::SchemaValidation)?;
        log::debug!("flow '{}' returned {} fields", flow.name, record.len());
        Ok(record)
    }
}

/// Render the flow's template and append the output contract so the model
/// knows the exact JSON object to produce.
fn build_prompt(flow: &FlowDefinition, input: &Record) -> String {
    let mut prompt = flow.render(input);
    prompt.push_str("\nRespond ONLY with a valid JSON object containing exactly these fields:\n");
    for spec in &flow.output.fields {
        match &spec.field_type {
            FieldType::Enum(allowed) => prompt.push_str(&format!(
                "- {} (one of: {}): {}\n",
                spec.name,
                allowed.join(", "),
                spec.description
            )),
            other => prompt.push_str(&format!(
                "- {} ({}): {}\n",
                spec.name,
                type_label(other),
                spec.description
            )),
        }
    }
    prompt
}

fn type_label(field_type: &FieldType) -> &'static str {
    match field_type {
        FieldType::Str => "string",
        FieldType::Number => "number",
        FieldType::Bool => "boolean",
        FieldType::Enum(_) => "string",
        FieldType::Json => "JSON string",
    }
}

fn parse_output(flow: &FlowDefinition, raw: &str) -> Result<Record, Vec<Violation>> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| vec![Violation::malformed("response", e.to_string())])?;

    match value {
        Value::Object(map) => flow.output.project(&map),
        other => Err(vec![Violation::malformed(
            "response",
            format!("expected a JSON object, got {}", json_kind(&other)),
        )]),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog;
    use crate::core::shape::Shape;
    use crate::llm::error::ProviderError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedService {
        response: String,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedService {
        fn returning(response: impl Into<String>) -> Self {
            Self {
                response: response.into(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerationService for ScriptedService {
        async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.response.clone())
        }
    }

    #[tokio::test]
    async fn test_prompt_carries_rendered_input_and_output_contract() {
        let service = ScriptedService::returning(r#"{"summary": "ok"}"#);
        let invoker = Invoker::new(service);
        let input = Record::new().with("alerts", "3 critical disk alerts at 02:00");

        invoker
            .invoke(&catalog::summarize_alerts(), &input)
            .await
            .unwrap();

        let prompts = invoker.service.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("3 critical disk alerts at 02:00"));
        assert!(prompts[0].contains("Respond ONLY with a valid JSON object"));
        assert!(prompts[0].contains("- summary (string):"));
    }

    #[tokio::test]
    async fn test_enum_fields_list_allowed_values_in_prompt() {
        let service = ScriptedService::returning(
            r#"{"risk_score": 45, "risk_level": "Medium", "key_risk_factors": "- logins", "recommendation": "Monitor activity"}"#,
        );
        let invoker = Invoker::new(service);
        let input = Record::new()
            .with("identifier", "10.0.0.5")
            .with("activity_data", "5 failed logins");

        invoker
            .invoke(&catalog::score_user_ip_risk(), &input)
            .await
            .unwrap();

        let prompts = invoker.service.prompts.lock().unwrap();
        assert!(prompts[0].contains("risk_level (one of: Low, Medium, High, Critical)"));
    }

    #[tokio::test]
    async fn test_non_json_response_is_a_schema_violation() {
        let service = ScriptedService::returning("I'm sorry, I can't help with that.");
        let invoker = Invoker::new(service);
        let flow = FlowDefinition::new(
            "t",
            "",
            Shape::new().field("q", FieldType::Str, ""),
            Shape::new().field("a", FieldType::Str, ""),
            "{{q}}",
        );

        let err = invoker
            .invoke(&flow, &Record::new().with("q", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, InvocationError::SchemaValidation(_)));
    }

    #[tokio::test]
    async fn test_json_array_response_is_rejected() {
        let service = ScriptedService::returning(r#"[{"a": "x"}]"#);
        let invoker = Invoker::new(service);
        let flow = FlowDefinition::new(
            "t",
            "",
            Shape::new().field("q", FieldType::Str, ""),
            Shape::new().field("a", FieldType::Str, ""),
            "{{q}}",
        );

        let err = invoker
            .invoke(&flow, &Record::new().with("q", "hi"))
            .await
            .unwrap_err();
        let violations = err.violations().unwrap();
        assert!(violations[0].to_string().contains("an array"));
    }
}
