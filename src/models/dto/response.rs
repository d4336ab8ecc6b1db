use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    models::domain::{Difficulty, HistoryEntry, QuestionRecord},
    services::renderer::{render_batch, RenderedQuestion},
};

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct GeneratedBatchDto {
    pub batch_id: Uuid,
    pub topic: String,
    pub difficulty: Difficulty,
    pub requested_count: u32,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<RenderedQuestion>,
}

impl From<&HistoryEntry> for GeneratedBatchDto {
    fn from(entry: &HistoryEntry) -> Self {
        GeneratedBatchDto {
            batch_id: entry.id,
            topic: entry.topic.clone(),
            difficulty: entry.difficulty,
            requested_count: entry.requested_count,
            created_at: entry.created_at,
            questions: render_batch(&entry.questions),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct HistorySummaryDto {
    pub batch_id: Uuid,
    pub topic: String,
    pub difficulty: Difficulty,
    pub requested_count: u32,
    pub question_count: u32,
    pub created_at: DateTime<Utc>,
}

impl From<&HistoryEntry> for HistorySummaryDto {
    fn from(entry: &HistoryEntry) -> Self {
        HistorySummaryDto {
            batch_id: entry.id,
            topic: entry.topic.clone(),
            difficulty: entry.difficulty,
            requested_count: entry.requested_count,
            question_count: u32::try_from(entry.questions.len()).unwrap_or(u32::MAX),
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizedQuestionsDto {
    pub questions: Vec<RenderedQuestion>,
}

impl From<&[QuestionRecord]> for NormalizedQuestionsDto {
    fn from(records: &[QuestionRecord]) -> Self {
        NormalizedQuestionsDto {
            questions: render_batch(records),
        }
    }
}

#[derive(Debug, Serialize, SimpleObject)]
pub struct ClearHistoryResponse {
    pub removed: u32,
    pub message: String,
}
