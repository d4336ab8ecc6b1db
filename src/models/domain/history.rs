use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::domain::{generation::Difficulty, GenerationParams, QuestionRecord};

/// One generated batch kept in a session's history.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub topic: String,
    pub difficulty: Difficulty,
    pub requested_count: u32,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<QuestionRecord>,
}

impl HistoryEntry {
    pub fn new(params: &GenerationParams, questions: Vec<QuestionRecord>) -> Self {
        HistoryEntry {
            id: Uuid::new_v4(),
            topic: params.topic().to_string(),
            difficulty: params.difficulty(),
            requested_count: params.count(),
            created_at: Utc::now(),
            questions,
        }
    }
}
