use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{Level, event};

use crate::types::question::{Question, QuestionId};
use crate::types::sort::SortMode;

/// Which lock state governs an answer input.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnswerLockScope {
    /// Each question is locked and unlocked on its own.
    #[default]
    PerQuestion,
    /// One flag gates every answer input on the board: submitting any answer
    /// locks all of them, editing any answer unlocks all of them.
    Board,
}

impl FromStr for AnswerLockScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per_question" => Ok(AnswerLockScope::PerQuestion),
            "board" => Ok(AnswerLockScope::Board),
            other => Err(format!(
                "unknown answer lock scope `{}` (expected per_question or board)",
                other
            )),
        }
    }
}

/// In-memory state of one Q&A session.
#[derive(Debug, Clone, Default)]
pub struct Board {
    questions: Vec<Question>,
    draft_question_text: String,
    sort_mode: SortMode,
    bookmark_filter_active: bool,
    answer_input_locked: bool,
    answer_lock_scope: AnswerLockScope,
    next_id: u64,
}

/// A visible question together with the lock that applies to its answer input.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QuestionView {
    #[serde(flatten)]
    pub question: Question,
    pub answer_input_locked: bool,
}

/// Read-only copy of the board handed to the presentation layer.
#[derive(Serialize, Debug, Clone)]
pub struct BoardSnapshot {
    pub questions: Vec<Question>,
    pub visible_questions: Vec<QuestionView>,
    pub sort_mode: SortMode,
    pub bookmark_filter_active: bool,
    pub answer_input_locked: bool,
    pub answer_lock_scope: AnswerLockScope,
    pub draft_question_text: String,
}

impl Board {
    pub fn new(answer_lock_scope: AnswerLockScope) -> Self {
        Board {
            answer_lock_scope,
            ..Board::default()
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn draft_question_text(&self) -> &str {
        &self.draft_question_text
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn bookmark_filter_active(&self) -> bool {
        self.bookmark_filter_active
    }

    /// The board-wide lock flag. Only governs answer inputs under
    /// `AnswerLockScope::Board`.
    pub fn answer_input_locked(&self) -> bool {
        self.answer_input_locked
    }

    pub fn answer_lock_scope(&self) -> AnswerLockScope {
        self.answer_lock_scope
    }

    /// Creates a question from `text` at the front of the collection and clears the draft.
    pub fn submit_question(&mut self, text: impl Into<String>) -> QuestionId {
        self.submit_question_at(text, Utc::now())
    }

    pub(crate) fn submit_question_at(
        &mut self,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> QuestionId {
        self.next_id += 1;
        let id = QuestionId(self.next_id);
        self.questions
            .insert(0, Question::new(id, text.into(), timestamp));
        self.draft_question_text.clear();
        event!(Level::DEBUG, question_id = %id, "question submitted");
        id
    }

    pub fn update_question_draft(&mut self, text: impl Into<String>) {
        self.draft_question_text = text.into();
    }

    /// Submits whatever is in the compose buffer.
    pub fn submit_draft(&mut self) -> QuestionId {
        let text = std::mem::take(&mut self.draft_question_text);
        self.submit_question(text)
    }

    pub fn update_answer_draft(&mut self, id: QuestionId, answer: impl Into<String>) {
        let answer = answer.into();
        let per_question = self.answer_lock_scope == AnswerLockScope::PerQuestion;
        if !per_question {
            self.answer_input_locked = false;
        }
        self.update(id, |q| {
            q.answer = answer;
            if per_question {
                q.answer_locked = false;
            }
        });
    }

    pub fn submit_answer(&mut self, id: QuestionId) {
        let per_question = self.answer_lock_scope == AnswerLockScope::PerQuestion;
        self.update(id, |q| {
            q.is_answered = true;
            if per_question {
                q.answer_locked = true;
            }
        });
        if !per_question {
            self.answer_input_locked = true;
        }
    }

    pub fn toggle_bookmark(&mut self, id: QuestionId) {
        self.update(id, |q| q.is_bookmarked = !q.is_bookmarked);
    }

    /// Adds `delta` to the question's vote count. There is no floor or ceiling
    /// short of the integer limits.
    pub fn vote(&mut self, id: QuestionId, delta: i64) {
        self.update(id, |q| q.votes = q.votes.saturating_add(delta));
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
    }

    pub fn toggle_bookmark_filter(&mut self) {
        self.bookmark_filter_active = !self.bookmark_filter_active;
    }

    /// Flips the lock that governs `id`'s answer input. Under
    /// `AnswerLockScope::Board` that is the shared flag, so every input flips.
    pub fn toggle_answer_lock(&mut self, id: QuestionId) {
        match self.answer_lock_scope {
            AnswerLockScope::Board => self.answer_input_locked = !self.answer_input_locked,
            AnswerLockScope::PerQuestion => {
                self.update(id, |q| q.answer_locked = !q.answer_locked)
            }
        }
    }

    pub fn is_answer_input_locked(&self, id: QuestionId) -> bool {
        match self.answer_lock_scope {
            AnswerLockScope::Board => self.answer_input_locked,
            AnswerLockScope::PerQuestion => self.question(id).is_some_and(|q| q.answer_locked),
        }
    }

    fn is_locked(&self, question: &Question) -> bool {
        match self.answer_lock_scope {
            AnswerLockScope::Board => self.answer_input_locked,
            AnswerLockScope::PerQuestion => question.answer_locked,
        }
    }

    /// The filtered and sorted display list. Recomputed on every call.
    pub fn visible_questions(&self) -> Vec<QuestionView> {
        let mut visible: Vec<QuestionView> = self
            .questions
            .iter()
            .filter(|q| !self.bookmark_filter_active || q.is_bookmarked)
            .map(|q| QuestionView {
                question: q.clone(),
                answer_input_locked: self.is_locked(q),
            })
            .collect();

        // sort_by is stable, ties keep collection order
        match self.sort_mode {
            SortMode::ByVotes => visible.sort_by(|a, b| b.question.votes.cmp(&a.question.votes)),
            SortMode::ByDate => {
                visible.sort_by(|a, b| b.question.timestamp.cmp(&a.question.timestamp))
            }
        }
        visible
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            questions: self.questions.clone(),
            visible_questions: self.visible_questions(),
            sort_mode: self.sort_mode,
            bookmark_filter_active: self.bookmark_filter_active,
            answer_input_locked: self.answer_input_locked,
            answer_lock_scope: self.answer_lock_scope,
            draft_question_text: self.draft_question_text.clone(),
        }
    }

    fn update<F>(&mut self, id: QuestionId, f: F)
    where
        F: FnOnce(&mut Question),
    {
        match self.questions.iter_mut().find(|q| q.id == id) {
            Some(question) => f(question),
            None => event!(Level::DEBUG, question_id = %id, "no question with this id"),
        }
    }
}
