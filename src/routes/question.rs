use tracing::{Level, event, instrument};

use crate::store::Store;
use crate::types::question::{AnswerDraft, NewQuestion, QuestionId, Vote};

#[instrument]
pub async fn get_questions(store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    event!(target: "question_board", Level::INFO, "querying visible questions");
    let res = store.visible_questions().await;
    Ok(warp::reply::json(&res))
}

pub async fn add_question(
    store: Store,
    new_question: NewQuestion,
) -> Result<impl warp::Reply, warp::Rejection> {
    let res = store.submit_question(new_question.text).await;
    Ok(warp::reply::json(&res))
}

pub async fn update_answer(
    id: u64,
    store: Store,
    draft: AnswerDraft,
) -> Result<impl warp::Reply, warp::Rejection> {
    let res = store.update_answer_draft(QuestionId(id), draft.answer).await;
    Ok(warp::reply::json(&res))
}

pub async fn submit_answer(id: u64, store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let res = store.submit_answer(QuestionId(id)).await;
    Ok(warp::reply::json(&res))
}

pub async fn toggle_bookmark(id: u64, store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let res = store.toggle_bookmark(QuestionId(id)).await;
    Ok(warp::reply::json(&res))
}

pub async fn vote(
    id: u64,
    store: Store,
    vote: Vote,
) -> Result<impl warp::Reply, warp::Rejection> {
    let res = store.vote(QuestionId(id), vote.delta).await;
    Ok(warp::reply::json(&res))
}

pub async fn toggle_answer_lock(
    id: u64,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    let res = store.toggle_answer_lock(QuestionId(id)).await;
    Ok(warp::reply::json(&res))
}
