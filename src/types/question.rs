use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Deserialize, Clone, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub answer: String,
    pub is_answered: bool,
    pub timestamp: DateTime<Utc>,
    pub votes: i64,
    pub is_bookmarked: bool,
    /// Lock on this question's own answer input. Only consulted under
    /// `AnswerLockScope::PerQuestion`.
    pub answer_locked: bool,
}

impl Question {
    pub fn new(id: QuestionId, text: String, timestamp: DateTime<Utc>) -> Self {
        Question {
            id,
            text,
            answer: String::new(),
            is_answered: false,
            timestamp,
            votes: 0,
            is_bookmarked: false,
            answer_locked: false,
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, Eq, Hash, Deserialize, PartialEq, PartialOrd, Ord)]
pub struct QuestionId(pub u64);

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewQuestion {
    pub text: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Draft {
    pub text: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AnswerDraft {
    pub answer: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy)]
pub struct Vote {
    pub delta: i64,
}
