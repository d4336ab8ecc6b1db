use async_graphql::{Enum, SimpleObject};
use serde::Serialize;

use crate::models::domain::QuestionRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Enum)]
pub enum QuestionKind {
    MultipleChoice,
    OpenEnded,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct RenderedOption {
    pub letter: String,
    pub text: String,
    pub correct: bool,
}

/// Display view of one record: numbered, options lettered A, B, C...
#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct RenderedQuestion {
    pub number: u32,
    pub kind: QuestionKind,
    pub question: String,
    pub options: Vec<RenderedOption>,
    pub answer: String,
    pub answer_letter: Option<String>,
    pub explanation: Option<String>,
}

pub fn render_batch(records: &[QuestionRecord]) -> Vec<RenderedQuestion> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| render_question(record, i + 1))
        .collect()
}

pub fn render_question(record: &QuestionRecord, number: usize) -> RenderedQuestion {
    let answer_position = record.answer_position();

    let options = record
        .options()
        .iter()
        .enumerate()
        .map(|(i, text)| RenderedOption {
            letter: option_letter(i),
            text: text.clone(),
            correct: answer_position == Some(i),
        })
        .collect();

    RenderedQuestion {
        number: u32::try_from(number).unwrap_or(u32::MAX),
        kind: if record.is_multiple_choice() {
            QuestionKind::MultipleChoice
        } else {
            QuestionKind::OpenEnded
        },
        question: record.question().to_string(),
        options,
        answer: record.answer().to_string(),
        answer_letter: answer_position.map(option_letter),
        explanation: record.explanation().map(str::to_string),
    }
}

/// Spreadsheet-style letters for a zero-based position: A..Z, AA, AB...
pub fn option_letter(position: usize) -> String {
    let mut n = position + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
