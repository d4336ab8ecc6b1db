use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{AppError, AppResult};

/// A provider reply before normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum RawResponse {
    /// Typed reply whose `questions` property holds the question-like values.
    Batch(ProviderBatch),
    /// Untyped reply: a bare array, or an object with a `"questions"` key.
    Json(Value),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ProviderBatch {
    pub questions: Vec<QuestionLike>,
}

/// A question as the provider is asked to produce it. Every field is optional;
/// which ones are mandatory is decided during normalization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ProviderQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    /// 1-based position of the correct option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Either representation of a question: typed attributes or a loose mapping.
///
/// Deserialization prefers the typed form and falls back to the mapping when
/// a field has an unexpected type (for example numeric options).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QuestionLike {
    Attributes(ProviderQuestion),
    Mapping(Map<String, Value>),
}

impl QuestionLike {
    pub fn from_value(value: Value, position: usize) -> AppResult<Self> {
        match value {
            Value::Object(map) => Ok(QuestionLike::Mapping(map)),
            other => Err(AppError::MalformedResponse(format!(
                "question {} is not an object (found {})",
                position,
                json_kind(&other)
            ))),
        }
    }

    /// Flattens either representation into one mapping. Absent attributes
    /// are left out rather than written as null.
    pub fn into_fields(self) -> Map<String, Value> {
        match self {
            QuestionLike::Mapping(map) => map,
            QuestionLike::Attributes(q) => {
                let mut map = Map::new();
                let mut put = |key: &str, value: Option<Value>| {
                    if let Some(value) = value {
                        map.insert(key.to_string(), value);
                    }
                };
                put("question", q.question.map(Value::String));
                put("text", q.text.map(Value::String));
                put(
                    "options",
                    q.options
                        .map(|o| Value::Array(o.into_iter().map(Value::String).collect())),
                );
                put("answer", q.answer.map(Value::String));
                put("correct_answer", q.correct_answer.map(Value::String));
                put("correct_option", q.correct_option.map(Value::from));
                put("explanation", q.explanation.map(Value::String));
                map
            }
        }
    }
}

impl From<ProviderQuestion> for QuestionLike {
    fn from(question: ProviderQuestion) -> Self {
        QuestionLike::Attributes(question)
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
