use handle_errors::return_error;
use warp::{Filter, http::Method};

use crate::store::Store;

pub mod board;
pub mod question;

pub fn routes(
    store: Store,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let store_filter = warp::any().map(move || store.clone());

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("Content-Type")
        .allow_methods(&[Method::PUT, Method::POST, Method::GET]);

    let get_board = warp::get()
        .and(warp::path("board"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(board::get_board);

    let get_questions = warp::get()
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(question::get_questions)
        .with(warp::trace(|info| {
            tracing::info_span!(
                "get_questions request",
                method = %info.method(),
                path = %info.path(),
                id = %uuid::Uuid::new_v4(),
            )
        }));

    let add_question = warp::post()
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(question::add_question);

    let update_draft = warp::put()
        .and(warp::path("draft"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(board::update_draft);

    let submit_draft = warp::post()
        .and(warp::path("draft"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(board::submit_draft);

    let update_answer = warp::put()
        .and(warp::path("questions"))
        .and(warp::path::param::<u64>())
        .and(warp::path("answer"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(question::update_answer);

    let submit_answer = warp::post()
        .and(warp::path("questions"))
        .and(warp::path::param::<u64>())
        .and(warp::path("answer"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(question::submit_answer);

    let toggle_bookmark = warp::post()
        .and(warp::path("questions"))
        .and(warp::path::param::<u64>())
        .and(warp::path("bookmark"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(question::toggle_bookmark);

    let vote = warp::post()
        .and(warp::path("questions"))
        .and(warp::path::param::<u64>())
        .and(warp::path("vote"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(question::vote);

    let toggle_answer_lock = warp::post()
        .and(warp::path("questions"))
        .and(warp::path::param::<u64>())
        .and(warp::path("lock"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(question::toggle_answer_lock);

    let set_sort_mode = warp::put()
        .and(warp::path("sort"))
        .and(warp::path::end())
        .and(warp::query())
        .and(store_filter.clone())
        .and_then(board::set_sort_mode);

    let toggle_bookmark_filter = warp::post()
        .and(warp::path("bookmarks"))
        .and(warp::path("filter"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(board::toggle_bookmark_filter);

    get_board
        .or(get_questions)
        .or(add_question)
        .or(update_draft)
        .or(submit_draft)
        .or(update_answer)
        .or(submit_answer)
        .or(toggle_bookmark)
        .or(vote)
        .or(toggle_answer_lock)
        .or(set_sort_mode)
        .or(toggle_bookmark_filter)
        .with(cors)
        .with(warp::trace::request())
        .recover(return_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::board::AnswerLockScope;
    use serde_json::{Value, json};
    use warp::http::StatusCode;

    fn body(res: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
        serde_json::from_slice(res.body()).unwrap()
    }

    fn visible_texts(snapshot: &Value) -> Vec<String> {
        snapshot["visible_questions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["text"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn board_scenario_over_http() {
        let filter = routes(Store::new(AnswerLockScope::Board));

        for text in ["Q1", "Q2"] {
            let res = warp::test::request()
                .method("POST")
                .path("/questions")
                .json(&json!({ "text": text }))
                .reply(&filter)
                .await;
            assert_eq!(res.status(), StatusCode::OK);
        }

        let res = warp::test::request()
            .method("GET")
            .path("/board")
            .reply(&filter)
            .await;
        let snapshot = body(&res);
        let ids: Vec<u64> = snapshot["questions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["id"].as_u64().unwrap())
            .collect();
        let (q2, q1) = (ids[0], ids[1]);
        assert_eq!(snapshot["questions"][0]["text"], "Q2");

        warp::test::request()
            .method("POST")
            .path(&format!("/questions/{}/vote", q1))
            .json(&json!({ "delta": 3 }))
            .reply(&filter)
            .await;
        warp::test::request()
            .method("POST")
            .path(&format!("/questions/{}/vote", q2))
            .json(&json!({ "delta": 1 }))
            .reply(&filter)
            .await;
        let res = warp::test::request()
            .method("PUT")
            .path("/sort?mode=votes")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(visible_texts(&body(&res)), vec!["Q1", "Q2"]);

        warp::test::request()
            .method("POST")
            .path(&format!("/questions/{}/bookmark", q1))
            .reply(&filter)
            .await;
        let res = warp::test::request()
            .method("POST")
            .path("/bookmarks/filter")
            .reply(&filter)
            .await;
        assert_eq!(visible_texts(&body(&res)), vec!["Q1"]);

        let res = warp::test::request()
            .method("POST")
            .path(&format!("/questions/{}/answer", q1))
            .reply(&filter)
            .await;
        let snapshot = body(&res);
        assert_eq!(snapshot["answer_input_locked"], true);
        assert_eq!(snapshot["questions"][1]["is_answered"], true);

        let res = warp::test::request()
            .method("GET")
            .path("/questions")
            .reply(&filter)
            .await;
        let visible = body(&res);
        assert_eq!(visible[0]["text"], "Q1");
        assert_eq!(visible[0]["answer_input_locked"], true);
    }

    #[tokio::test]
    async fn answer_lock_is_per_question_by_default() {
        let store = Store::new(AnswerLockScope::default());
        let filter = routes(store.clone());
        let snapshot = store.submit_question("Q1".to_string()).await;
        let q1 = snapshot.questions[0].id.0;
        store.submit_question("Q2".to_string()).await;

        let res = warp::test::request()
            .method("POST")
            .path(&format!("/questions/{}/answer", q1))
            .reply(&filter)
            .await;
        let snapshot = body(&res);
        assert_eq!(snapshot["answer_input_locked"], false);
        let locks: Vec<(String, bool)> = snapshot["visible_questions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| {
                (
                    q["text"].as_str().unwrap().to_string(),
                    q["answer_input_locked"].as_bool().unwrap(),
                )
            })
            .collect();
        assert_eq!(
            locks,
            vec![("Q2".to_string(), false), ("Q1".to_string(), true)]
        );

        let res = warp::test::request()
            .method("PUT")
            .path(&format!("/questions/{}/answer", q1))
            .json(&json!({ "answer": "edited" }))
            .reply(&filter)
            .await;
        let snapshot = body(&res);
        assert_eq!(snapshot["questions"][1]["answer"], "edited");
        assert_eq!(snapshot["questions"][1]["answer_locked"], false);
    }

    #[tokio::test]
    async fn draft_round_trip() {
        let filter = routes(Store::new(AnswerLockScope::default()));
        let res = warp::test::request()
            .method("PUT")
            .path("/draft")
            .json(&json!({ "text": "What is Pin?" }))
            .reply(&filter)
            .await;
        assert_eq!(body(&res)["draft_question_text"], "What is Pin?");

        let res = warp::test::request()
            .method("POST")
            .path("/draft")
            .reply(&filter)
            .await;
        let snapshot = body(&res);
        assert_eq!(snapshot["draft_question_text"], "");
        assert_eq!(snapshot["questions"][0]["text"], "What is Pin?");
    }

    #[tokio::test]
    async fn unknown_question_id_still_succeeds() {
        let filter = routes(Store::new(AnswerLockScope::default()));
        let res = warp::test::request()
            .method("POST")
            .path("/questions/42/vote")
            .json(&json!({ "delta": 1 }))
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body(&res)["questions"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn bad_sort_mode_is_unprocessable() {
        let filter = routes(Store::new(AnswerLockScope::default()));
        let res = warp::test::request()
            .method("PUT")
            .path("/sort?mode=alphabetical")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(res.body().as_ref(), b"Unknown sort mode: alphabetical");

        let res = warp::test::request()
            .method("PUT")
            .path("/sort")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(res.body().as_ref(), b"Missing parameters");
    }

    #[tokio::test]
    async fn malformed_body_is_unprocessable() {
        let filter = routes(Store::new(AnswerLockScope::default()));
        let res = warp::test::request()
            .method("POST")
            .path("/questions")
            .header("content-type", "application/json")
            .body("{\"title\": 1}")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let filter = routes(Store::new(AnswerLockScope::default()));
        let res = warp::test::request()
            .method("GET")
            .path("/answers")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.body().as_ref(), b"Route not found");
    }
}
