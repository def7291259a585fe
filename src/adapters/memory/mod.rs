//! In-memory record stores.

mod question_board;

pub use question_board::InMemoryQuestionRepository;
