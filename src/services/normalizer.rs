//! Turns a provider reply of uncertain shape into validated question records.
//!
//! Accepted shapes, checked in this order: a typed batch exposing
//! `questions`, a bare array, an object with a `"questions"` array. The first
//! invalid question fails the whole batch.

use serde_json::{Map, Value};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{raw_response::json_kind, QuestionLike, QuestionRecord, RawResponse},
};

const QUESTION_KEYS: &[&str] = &["question", "text"];
const ANSWER_TEXT_KEYS: &[&str] = &["answer", "correct_answer"];
const ANSWER_INDEX_KEYS: &[&str] = &["correct_option"];
const EXPLANATION_KEYS: &[&str] = &["explanation"];

pub fn normalize_response(raw: RawResponse) -> AppResult<Vec<QuestionRecord>> {
    let (shape, elements) = elements_of(raw)?;
    log::debug!(
        "Normalizing {} question(s) from {} response",
        elements.len(),
        shape
    );

    elements
        .into_iter()
        .enumerate()
        .map(|(i, element)| {
            let position = i + 1;
            let fields = element.into_question_like(position)?.into_fields();
            normalize_question(fields, position)
        })
        .collect()
}

/// Shorthand for replies that arrive as plain JSON.
pub fn normalize_value(value: Value) -> AppResult<Vec<QuestionRecord>> {
    normalize_response(RawResponse::Json(value))
}

/// One batch element, checked for shape only when its turn comes.
enum Element {
    Typed(QuestionLike),
    Json(Value),
}

impl Element {
    fn into_question_like(self, position: usize) -> AppResult<QuestionLike> {
        match self {
            Element::Typed(like) => Ok(like),
            Element::Json(value) => QuestionLike::from_value(value, position),
        }
    }
}

fn elements_of(raw: RawResponse) -> AppResult<(&'static str, Vec<Element>)> {
    match raw {
        RawResponse::Batch(batch) => Ok((
            "typed batch",
            batch.questions.into_iter().map(Element::Typed).collect(),
        )),
        RawResponse::Json(Value::Array(items)) => Ok(("array", json_elements(items))),
        RawResponse::Json(Value::Object(mut map)) => match map.remove("questions") {
            Some(Value::Array(items)) => Ok(("questions mapping", json_elements(items))),
            Some(other) => Err(AppError::MalformedResponse(format!(
                "\"questions\" must be an array, found {}",
                json_kind(&other)
            ))),
            None => Err(AppError::MalformedResponse(
                "object has no \"questions\" key".to_string(),
            )),
        },
        RawResponse::Json(other) => Err(AppError::MalformedResponse(format!(
            "expected an array or an object with \"questions\", found {}",
            json_kind(&other)
        ))),
    }
}

fn json_elements(items: Vec<Value>) -> Vec<Element> {
    items.into_iter().map(Element::Json).collect()
}

fn normalize_question(fields: Map<String, Value>, position: usize) -> AppResult<QuestionRecord> {
    let question = match first_present(&fields, QUESTION_KEYS) {
        Some((key, value)) => required_text(value, key, position)?,
        None => return Err(AppError::missing_field(position, "question")),
    };
    let options = options_of(&fields, position)?;
    let explanation = first_present(&fields, EXPLANATION_KEYS)
        .map(|(key, value)| required_text(value, key, position))
        .transpose()?;

    if let Some((key, value)) = first_present(&fields, ANSWER_TEXT_KEYS) {
        let answer = required_text(value, key, position)?;
        return QuestionRecord::with_answer(question, options, answer, explanation)
            .map_err(|e| e.at(position));
    }

    if let Some((key, value)) = first_present(&fields, ANSWER_INDEX_KEYS) {
        let index = integer_of(value).ok_or_else(|| {
            AppError::MalformedResponse(format!(
                "question {}: '{}' must be an integer, found {}",
                position,
                key,
                value
            ))
        })?;
        return QuestionRecord::with_answer_index(question, options, index, explanation)
            .map_err(|e| e.at(position));
    }

    Err(AppError::missing_field(position, "answer"))
}

/// First key in `keys` holding a non-null value.
fn first_present<'a>(
    fields: &'a Map<String, Value>,
    keys: &[&'static str],
) -> Option<(&'static str, &'a Value)> {
    keys.iter().find_map(|key| match fields.get(*key) {
        None | Some(Value::Null) => None,
        Some(value) => Some((*key, value)),
    })
}

/// Missing or non-array options mean an open-ended question.
fn options_of(fields: &Map<String, Value>, position: usize) -> AppResult<Vec<String>> {
    let Some(Value::Array(items)) = fields.get("options") else {
        return Ok(Vec::new());
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            option_text(item).ok_or_else(|| {
                AppError::MalformedResponse(format!(
                    "question {}: option {} is {}, expected text",
                    position,
                    i + 1,
                    json_kind(item)
                ))
            })
        })
        .collect()
}

fn option_text(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map.get("text").and_then(scalar_text),
        other => scalar_text(other),
    }
}

fn required_text(value: &Value, key: &str, position: usize) -> AppResult<String> {
    scalar_text(value).ok_or_else(|| {
        AppError::MalformedResponse(format!(
            "question {}: '{}' must be text, found {}",
            position,
            key,
            json_kind(value)
        ))
    })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn integer_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
