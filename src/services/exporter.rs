use serde::Serialize;
use serde_json::Value;

use crate::{errors::AppResult, models::domain::QuestionRecord};

const DEFAULT_FILE_NAME: &str = "questions.json";

#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    questions: Vec<ExportedQuestion<'a>>,
}

/// Field order here is the field order of the exported document.
#[derive(Debug, Serialize)]
struct ExportedQuestion<'a> {
    question: &'a str,
    options: &'a [String],
    answer: &'a str,
    explanation: Option<&'a str>,
}

impl<'a> From<&'a QuestionRecord> for ExportedQuestion<'a> {
    fn from(record: &'a QuestionRecord) -> Self {
        ExportedQuestion {
            question: record.question(),
            options: record.options(),
            answer: record.answer(),
            explanation: record.explanation(),
        }
    }
}

fn document(records: &[QuestionRecord]) -> ExportDocument<'_> {
    ExportDocument {
        questions: records.iter().map(ExportedQuestion::from).collect(),
    }
}

/// Serializes a batch as a pretty-printed `{"questions": [...]}` document.
pub fn export_json(records: &[QuestionRecord]) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(&document(records))?)
}

pub fn export_value(records: &[QuestionRecord]) -> AppResult<Value> {
    Ok(serde_json::to_value(document(records))?)
}

/// Download name for a batch, e.g. `questions_world_war_ii.json`.
pub fn export_file_name(topic: &str) -> String {
    let slug = topic
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_");

    if slug.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        format!("questions_{}.json", slug)
    }
}
