pub mod fixtures {
    use crate::models::domain::{Difficulty, GenerationParams, HistoryEntry, QuestionRecord};

    /// A small batch mixing index answers, text answers, blank and absent
    /// explanations, and an open-ended question
    pub fn sample_batch() -> Vec<QuestionRecord> {
        vec![
            QuestionRecord::with_answer_index(
                "Which gas do plants absorb?",
                vec!["Oxygen".into(), "Carbon dioxide".into(), "Nitrogen".into()],
                2,
                Some("Used in photosynthesis.".into()),
            )
            .expect("valid record"),
            QuestionRecord::with_answer(
                "¿Cuál es la capital de Perú?",
                vec!["Lima".into(), "Cusco".into()],
                "Lima",
                Some(String::new()),
            )
            .expect("valid record"),
            QuestionRecord::with_answer("Name a prime number above 10", vec![], "11", None)
                .expect("valid record"),
        ]
    }

    /// Creates a history entry on the given topic holding the sample batch
    pub fn history_entry(topic: &str) -> HistoryEntry {
        let params =
            GenerationParams::new(topic, 3, Difficulty::Medium, None).expect("valid params");
        HistoryEntry::new(&params, sample_batch())
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_batch() {
        let batch = sample_batch();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].answer(), "Carbon dioxide");
        assert_eq!(batch[1].explanation(), Some(""));
        assert!(batch[2].options().is_empty());
    }

    #[test]
    fn test_fixtures_history_entry() {
        let entry = history_entry("Botany");
        assert_eq!(entry.topic, "Botany");
        assert_eq!(entry.requested_count, 3);
        assert_eq!(entry.questions, sample_batch());
    }
}
