pub mod generation;
pub mod history;
pub mod question_record;
pub mod raw_response;
pub use generation::{Difficulty, GenerationParams};
pub use history::HistoryEntry;
pub use question_record::{QuestionRecord, RecordError};
pub use raw_response::{ProviderBatch, ProviderQuestion, QuestionLike, RawResponse};
