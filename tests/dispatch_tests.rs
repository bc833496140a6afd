//! End-to-end turns through the dispatcher with in-memory backends.

use async_trait::async_trait;
use rotychat::dispatch::{Conversation, Dispatcher, GENERIC_ERROR, GREETING, Query};
use rotychat::services::{
    DispatchError, DispatchResult, LocalMathService, MathRequest, MathResponse, MathService,
    SearchHit, SearchRequest, SearchResponse, SearchService,
};
use rotychat::types::Role;
use serde_json::json;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingMath {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl MathService for RecordingMath {
    async fn evaluate(&self, request: &MathRequest) -> DispatchResult<MathResponse> {
        self.seen.lock().unwrap().push(request.expression.clone());
        Ok(MathResponse {
            result: Some(json!(4)),
            explanation: Some("Sum".into()),
            steps: vec!["2+2=4".into()],
            error: None,
        })
    }
}

#[derive(Default)]
struct RecordingSearch {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl SearchService for RecordingSearch {
    async fn search(&self, request: &SearchRequest) -> DispatchResult<SearchResponse> {
        self.seen.lock().unwrap().push(request.query.clone());
        Ok(SearchResponse {
            results: Some(vec![
                SearchHit {
                    title: Some("Париж".into()),
                    snippet: Some("Париж является столицей Франции.".into()),
                    url: Some("https://example.org/paris".into()),
                },
                SearchHit {
                    title: Some("Без ссылки".into()),
                    snippet: Some("...".into()),
                    url: Some(String::new()),
                },
            ]),
        })
    }
}

struct BrokenMath;

#[async_trait]
impl MathService for BrokenMath {
    async fn evaluate(&self, _request: &MathRequest) -> DispatchResult<MathResponse> {
        Err(DispatchError::Status {
            status: 500,
            body: "internal".into(),
        })
    }
}

struct BrokenSearch;

#[async_trait]
impl SearchService for BrokenSearch {
    async fn search(&self, _request: &SearchRequest) -> DispatchResult<SearchResponse> {
        let err = serde_json::from_str::<SearchResponse>("not json").unwrap_err();
        Err(DispatchError::Decode(err))
    }
}

fn recording() -> (Dispatcher, Arc<RecordingMath>, Arc<RecordingSearch>) {
    let math = Arc::new(RecordingMath::default());
    let search = Arc::new(RecordingSearch::default());
    let dispatcher = Dispatcher::new(math.clone(), search.clone());
    (dispatcher, math, search)
}

#[tokio::test]
async fn math_turn_appends_user_and_formatted_answer() {
    let (dispatcher, math, search) = recording();
    let mut conversation = Conversation::new();

    assert!(dispatcher.send(&mut conversation, "2+2").await);

    let messages = conversation.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].content, GREETING);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].content, "2+2");
    assert_eq!(messages[2].role, Role::Assistant);
    assert!(messages[2].content.contains("Sum"));
    assert!(messages[2].content.contains("Ответ: 4"));
    assert!(messages[2].content.contains("2+2=4"));
    assert!(messages[2].search_results.is_none());
    assert!(!conversation.is_searching());

    assert_eq!(*math.seen.lock().unwrap(), vec!["2+2".to_string()]);
    assert!(search.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn search_turn_keeps_only_sources_with_url() {
    let (dispatcher, math, search) = recording();
    let mut conversation = Conversation::new();

    assert!(dispatcher.send(&mut conversation, "какая столица Франции").await);

    let answer = conversation.messages().last().unwrap();
    assert!(answer.content.contains("Париж является столицей Франции."));
    let sources = answer.search_results.as_ref().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].url, "https://example.org/paris");

    assert!(math.seen.lock().unwrap().is_empty());
    assert_eq!(
        *search.seen.lock().unwrap(),
        vec!["какая столица Франции".to_string()]
    );
}

#[tokio::test]
async fn every_accepted_turn_adds_two_messages() {
    let (dispatcher, _, _) = recording();
    let mut conversation = Conversation::new();

    for (turn, input) in ["2+2", "погода в Москве", "сколько будет 3*3"]
        .into_iter()
        .enumerate()
    {
        assert!(dispatcher.send(&mut conversation, input).await);
        assert_eq!(conversation.messages().len(), 1 + 2 * (turn + 1));
        assert!(!conversation.is_searching());
    }
}

#[tokio::test]
async fn blank_input_leaves_conversation_untouched() {
    let (dispatcher, math, search) = recording();
    let mut conversation = Conversation::new();

    assert!(!dispatcher.send(&mut conversation, "   ").await);
    assert_eq!(conversation.messages().len(), 1);
    assert!(math.seen.lock().unwrap().is_empty());
    assert!(search.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn backend_failures_become_generic_error() {
    let dispatcher = Dispatcher::new(Arc::new(BrokenMath), Arc::new(BrokenSearch));
    let mut conversation = Conversation::new();

    for input in ["2+2", "что такое Rust"] {
        assert!(dispatcher.send(&mut conversation, input).await);
        let answer = conversation.messages().last().unwrap();
        assert_eq!(answer.content, GENERIC_ERROR);
        assert!(answer.search_results.is_none());
        assert!(!conversation.is_searching());
    }
}

#[tokio::test]
async fn split_turn_holds_busy_flag_until_finished() {
    let (dispatcher, _, _) = recording();
    let mut conversation = Conversation::new();

    let turn = conversation.begin("2+2").unwrap();
    assert!(conversation.is_searching());
    assert!(conversation.begin("3+3").is_none());

    let reply = dispatcher.resolve(&turn.query).await;
    conversation.finish(reply);
    assert!(!conversation.is_searching());
    assert_eq!(conversation.messages().len(), 3);
}

#[tokio::test]
async fn local_solver_answers_through_dispatcher() {
    let dispatcher = Dispatcher::new(Arc::new(LocalMathService), Arc::new(BrokenSearch));
    let mut conversation = Conversation::new();

    assert!(dispatcher.send(&mut conversation, "15 * 3").await);
    let answer = conversation.messages().last().unwrap();
    assert!(answer.content.contains("Ответ: 45"), "{}", answer.content);
}

#[test]
fn routing_picks_payload_per_route() {
    assert!(matches!(Query::for_input("2 + 2"), Query::Math(_)));
    assert!(matches!(Query::for_input("кто такой Пушкин"), Query::Search(_)));
}
