//! Flow definitions: one declared natural-language operation.

use serde_json::Value;

use crate::core::record::Record;
use crate::core::shape::Shape;

/// The immutable contract for one natural-language operation.
///
/// A flow pairs an input shape, an output shape, and a prompt template with
/// named placeholders. One instance exists per supported operation, created at
/// process start and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowDefinition {
    pub name: String,
    pub description: String,
    pub input: Shape,
    pub output: Shape,
    pub template: String,
}

impl FlowDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input: Shape,
        output: Shape,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input,
            output,
            template: template.into(),
        }
    }

    /// Render the prompt template against a validated input record.
    ///
    /// Each `{{field}}` (or `{{{field}}}`, equivalent) placeholder is replaced
    /// with the field's value: strings verbatim including multi-line text,
    /// numbers and booleans in their canonical JSON text form. A placeholder
    /// naming an absent optional field renders empty. No escaping is applied;
    /// the destination is plain prompt text.
    pub fn render(&self, input: &Record) -> String {
        let mut rendered = self.template.clone();
        for spec in &self.input.fields {
            let value = input
                .get(&spec.name)
                .map(render_value)
                .unwrap_or_default();
            let triple = format!("{{{{{{{}}}}}}}", spec.name);
            let double = format!("{{{{{}}}}}", spec.name);
            rendered = rendered.replace(&triple, &value);
            rendered = rendered.replace(&double, &value);
        }
        rendered
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
