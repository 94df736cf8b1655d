use std::collections::HashMap;
use tracing::{Level, event, instrument};

use crate::store::Store;
use crate::types::question::Draft;
use crate::types::sort::extract_sort_mode;

#[instrument]
pub async fn get_board(store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let res = store.snapshot().await;
    Ok(warp::reply::json(&res))
}

pub async fn update_draft(store: Store, draft: Draft) -> Result<impl warp::Reply, warp::Rejection> {
    let res = store.update_question_draft(draft.text).await;
    Ok(warp::reply::json(&res))
}

pub async fn submit_draft(store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let res = store.submit_draft().await;
    Ok(warp::reply::json(&res))
}

#[instrument]
pub async fn set_sort_mode(
    params: HashMap<String, String>,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mode = extract_sort_mode(params)?;
    event!(Level::INFO, ?mode, "sort mode changed");
    let res = store.set_sort_mode(mode).await;
    Ok(warp::reply::json(&res))
}

pub async fn toggle_bookmark_filter(store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let res = store.toggle_bookmark_filter().await;
    Ok(warp::reply::json(&res))
}
