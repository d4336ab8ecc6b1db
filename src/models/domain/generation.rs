use std::fmt;
use std::str::FromStr;

use async_graphql::Enum;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Enum)]
#[serde(try_from = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(AppError::ValidationError(format!(
                "difficulty must be one of Easy, Medium, Hard (got '{}')",
                other
            ))),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Validated parameters for one generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationParams {
    topic: String,
    count: u32,
    difficulty: Difficulty,
    instructions: Option<String>,
}

impl GenerationParams {
    /// Rejects a blank topic and a count below 1. The count is never adjusted.
    pub fn new(
        topic: &str,
        count: i64,
        difficulty: Difficulty,
        instructions: Option<&str>,
    ) -> AppResult<Self> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AppError::ValidationError(
                "topic must not be empty".to_string(),
            ));
        }

        let count = u32::try_from(count)
            .ok()
            .filter(|c| *c >= 1)
            .ok_or_else(|| {
                AppError::ValidationError(format!(
                    "count must be a positive integer (got {})",
                    count
                ))
            })?;

        let instructions = instructions
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            topic: topic.to_string(),
            count,
            difficulty,
            instructions,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }
}
