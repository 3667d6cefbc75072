//! Tests for paginated search.

mod common;

use ankirelay_engine::Error;
use ankirelay_engine::cursor;
use ankirelay_engine::search::{SEARCH_PAGE_SIZE, SearchMode};
use common::{
    engine_for_mock, mock_action, mock_action_times, mock_action_with_params, mock_anki_error,
    mock_anki_response, request_count, setup_mock_server,
};
use serde_json::{Value, json};

fn card_records(n: i64) -> Vec<Value> {
    (1..=n).map(|id| json!({"cardId": id, "question": format!("Q{}", id)})).collect()
}

#[tokio::test]
async fn test_search_cards_single_page() {
    let server = setup_mock_server().await;

    mock_action_with_params(
        &server,
        "findCards",
        json!({"query": "deck:Default"}),
        mock_anki_response(vec![1_i64, 2, 3]),
    )
    .await;
    mock_action_with_params(
        &server,
        "cardsInfo",
        json!({"cards": [1, 2, 3]}),
        mock_anki_response(card_records(3)),
    )
    .await;

    let engine = engine_for_mock(&server);
    let results = engine
        .search()
        .run("deck:Default", SearchMode::Cards, None)
        .await
        .unwrap();

    assert_eq!(results.mode, SearchMode::Cards);
    assert_eq!(results.query, "deck:Default");
    assert_eq!(results.total_found, 3);
    assert_eq!(results.items.len(), 3);
    assert!(results.next_cursor.is_none());
}

#[tokio::test]
async fn test_search_notes_paginates_by_hundred() {
    let server = setup_mock_server().await;
    let ids: Vec<i64> = (1..=250).collect();
    let records: Vec<Value> = ids.iter().map(|id| json!({"noteId": id})).collect();

    mock_action_times(&server, "findNotes", mock_anki_response(&ids), 3).await;
    mock_action_times(&server, "notesInfo", mock_anki_response(&records), 3).await;

    let engine = engine_for_mock(&server);
    let search = engine.search();

    let first = search.run("tag:verb", SearchMode::Notes, None).await.unwrap();
    assert_eq!(first.total_found, 250);
    assert_eq!(first.items.len(), SEARCH_PAGE_SIZE);
    assert_eq!(first.items[0]["noteId"], 1);
    let cursor = first.next_cursor.unwrap();
    assert_eq!(cursor::decode(&cursor).unwrap()["start_index"], json!(100));

    let second = search
        .run("tag:verb", SearchMode::Notes, Some(&cursor))
        .await
        .unwrap();
    assert_eq!(second.items[0]["noteId"], 101);

    let third = search
        .run("tag:verb", SearchMode::Notes, second.next_cursor.as_deref())
        .await
        .unwrap();
    assert_eq!(third.items.len(), 50);
    assert_eq!(third.items[49]["noteId"], 250);
    assert!(third.next_cursor.is_none());
}

#[tokio::test]
async fn test_search_float_ids_are_narrowed() {
    let server = setup_mock_server().await;

    mock_action(&server, "findCards", mock_anki_response(json!([10.0, 20.0]))).await;
    mock_action_with_params(
        &server,
        "cardsInfo",
        json!({"cards": [10, 20]}),
        mock_anki_response(card_records(2)),
    )
    .await;

    let engine = engine_for_mock(&server);
    let results = engine.search().run("is:new", SearchMode::Cards, None).await.unwrap();
    assert_eq!(results.total_found, 2);
}

#[tokio::test]
async fn test_search_no_matches_skips_info_lookup() {
    let server = setup_mock_server().await;

    mock_action(&server, "findNotes", mock_anki_response(Vec::<i64>::new())).await;
    mock_action_times(&server, "notesInfo", mock_anki_response(json!([])), 0).await;

    let engine = engine_for_mock(&server);
    let results = engine
        .search()
        .run("deck:Empty", SearchMode::Notes, None)
        .await
        .unwrap();

    assert_eq!(results.total_found, 0);
    assert!(results.items.is_empty());
    assert!(results.next_cursor.is_none());
}

#[tokio::test]
async fn test_search_non_numeric_id_is_unexpected_format() {
    let server = setup_mock_server().await;

    mock_action(&server, "findCards", mock_anki_response(json!([1, "two"]))).await;
    mock_action_times(&server, "cardsInfo", mock_anki_response(json!([])), 0).await;

    let engine = engine_for_mock(&server);
    let err = engine
        .search()
        .run("deck:Default", SearchMode::Cards, None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnexpectedFormat { action: "findCards", .. }));
}

#[tokio::test]
async fn test_search_invalid_cursor_makes_no_calls() {
    let server = setup_mock_server().await;
    let engine = engine_for_mock(&server);

    let err = engine
        .search()
        .run("deck:Default", SearchMode::Cards, Some("not-a-cursor"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidCursor(_)));
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_search_backend_error_has_context() {
    let server = setup_mock_server().await;

    mock_action(&server, "findCards", mock_anki_error("invalid search query")).await;

    let engine = engine_for_mock(&server);
    let err = engine
        .search()
        .run("deck:(", SearchMode::Cards, None)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Error finding cards: AnkiConnect error: invalid search query"
    );
}

#[tokio::test]
async fn test_search_stale_cursor_clamps_to_empty() {
    let server = setup_mock_server().await;

    mock_action(&server, "findCards", mock_anki_response(vec![1_i64, 2])).await;
    mock_action(&server, "cardsInfo", mock_anki_response(card_records(2))).await;

    let mut fields = cursor::CursorFields::new();
    fields.insert("start_index".into(), json!(500));
    let stale = cursor::encode(&fields);

    let engine = engine_for_mock(&server);
    let results = engine
        .search()
        .run("deck:Default", SearchMode::Cards, Some(&stale))
        .await
        .unwrap();

    assert_eq!(results.total_found, 2);
    assert!(results.items.is_empty());
    assert!(results.next_cursor.is_none());
}
