use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::types::board::{AnswerLockScope, Board, BoardSnapshot, QuestionView};
use crate::types::question::QuestionId;
use crate::types::sort::SortMode;

/// The single session board shared by all route handlers. Every event takes the
/// write guard for exactly one board operation.
#[derive(Debug, Clone)]
pub struct Store {
    pub board: Arc<RwLock<Board>>,
}

impl Store {
    pub fn new(answer_lock_scope: AnswerLockScope) -> Self {
        Store {
            board: Arc::new(RwLock::new(Board::new(answer_lock_scope))),
        }
    }

    pub async fn snapshot(&self) -> BoardSnapshot {
        self.board.read().await.snapshot()
    }

    pub async fn visible_questions(&self) -> Vec<QuestionView> {
        self.board.read().await.visible_questions()
    }

    #[instrument(skip(self))]
    pub async fn submit_question(&self, text: String) -> BoardSnapshot {
        let mut board = self.board.write().await;
        board.submit_question(text);
        board.snapshot()
    }

    #[instrument(skip(self))]
    pub async fn update_question_draft(&self, text: String) -> BoardSnapshot {
        let mut board = self.board.write().await;
        board.update_question_draft(text);
        board.snapshot()
    }

    #[instrument(skip(self))]
    pub async fn submit_draft(&self) -> BoardSnapshot {
        let mut board = self.board.write().await;
        board.submit_draft();
        board.snapshot()
    }

    #[instrument(skip(self))]
    pub async fn update_answer_draft(&self, id: QuestionId, answer: String) -> BoardSnapshot {
        let mut board = self.board.write().await;
        board.update_answer_draft(id, answer);
        board.snapshot()
    }

    #[instrument(skip(self))]
    pub async fn submit_answer(&self, id: QuestionId) -> BoardSnapshot {
        let mut board = self.board.write().await;
        board.submit_answer(id);
        board.snapshot()
    }

    #[instrument(skip(self))]
    pub async fn toggle_bookmark(&self, id: QuestionId) -> BoardSnapshot {
        let mut board = self.board.write().await;
        board.toggle_bookmark(id);
        board.snapshot()
    }

    #[instrument(skip(self))]
    pub async fn vote(&self, id: QuestionId, delta: i64) -> BoardSnapshot {
        let mut board = self.board.write().await;
        board.vote(id, delta);
        board.snapshot()
    }

    #[instrument(skip(self))]
    pub async fn toggle_answer_lock(&self, id: QuestionId) -> BoardSnapshot {
        let mut board = self.board.write().await;
        board.toggle_answer_lock(id);
        board.snapshot()
    }

    #[instrument(skip(self))]
    pub async fn set_sort_mode(&self, mode: SortMode) -> BoardSnapshot {
        let mut board = self.board.write().await;
        board.set_sort_mode(mode);
        board.snapshot()
    }

    #[instrument(skip(self))]
    pub async fn toggle_bookmark_filter(&self) -> BoardSnapshot {
        let mut board = self.board.write().await;
        board.toggle_bookmark_filter();
        board.snapshot()
    }
}
