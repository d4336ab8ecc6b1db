use thiserror::Error;

use crate::errors::AppError;

/// One validated question.
///
/// Fields are private so a record cannot change after construction; the
/// answer invariant is checked by the constructors.
#[derive(Clone, Debug)]
pub struct QuestionRecord {
    question: String,
    options: Vec<String>,
    answer: String,
    correct_index: Option<usize>,
    explanation: Option<String>,
}

/// Reasons a record cannot be constructed. Position-free; callers attach the
/// batch position with [`RecordError::at`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("question text is empty")]
    EmptyQuestion,

    #[error("answer '{0}' is not one of the options")]
    AnswerNotInOptions(String),

    #[error("answer index {index} is outside 1..={option_count}")]
    IndexOutOfRange { index: i64, option_count: usize },
}

impl RecordError {
    pub fn at(self, position: usize) -> AppError {
        match self {
            RecordError::EmptyQuestion => AppError::missing_field(position, "question"),
            RecordError::AnswerNotInOptions(answer) => {
                AppError::InconsistentAnswer { position, answer }
            }
            RecordError::IndexOutOfRange {
                index,
                option_count,
            } => AppError::InvalidAnswerIndex {
                position,
                index,
                option_count,
            },
        }
    }
}

impl QuestionRecord {
    /// Builds a record whose answer was supplied as literal text.
    pub fn with_answer(
        question: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
        explanation: Option<String>,
    ) -> Result<Self, RecordError> {
        let question = checked_question(question.into())?;
        let answer = answer.into();

        if !options.is_empty() && !options.contains(&answer) {
            return Err(RecordError::AnswerNotInOptions(answer));
        }

        Ok(Self {
            question,
            options,
            answer,
            correct_index: None,
            explanation,
        })
    }

    /// Builds a record from a 1-based option index, resolving it to the
    /// option text up front.
    pub fn with_answer_index(
        question: impl Into<String>,
        options: Vec<String>,
        index: i64,
        explanation: Option<String>,
    ) -> Result<Self, RecordError> {
        let question = checked_question(question.into())?;

        let position = usize::try_from(index)
            .ok()
            .filter(|i| (1..=options.len()).contains(i))
            .ok_or(RecordError::IndexOutOfRange {
                index,
                option_count: options.len(),
            })?;
        let answer = options[position - 1].clone();

        Ok(Self {
            question,
            options,
            answer,
            correct_index: Some(position),
            explanation,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// 1-based index the answer was resolved from, if it came from one.
    pub fn correct_index(&self) -> Option<usize> {
        self.correct_index
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Zero-based position of the first option equal to the answer.
    pub fn answer_position(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.answer)
    }

    pub fn is_multiple_choice(&self) -> bool {
        self.options.len() >= 2
    }
}

// correct_index is provenance only and does not take part in equality.
impl PartialEq for QuestionRecord {
    fn eq(&self, other: &Self) -> bool {
        self.question == other.question
            && self.options == other.options
            && self.answer == other.answer
            && self.explanation == other.explanation
    }
}

impl Eq for QuestionRecord {}

fn checked_question(question: String) -> Result<String, RecordError> {
    if question.trim().is_empty() {
        Err(RecordError::EmptyQuestion)
    } else {
        Ok(question)
    }
}
