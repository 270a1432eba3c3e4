//! BDD step definitions for the polling feature

use std::sync::{Arc, Mutex};

use cucumber::{given, then, when};

use homework_bot::engine::CycleOutcome;
use homework_bot::io::{HttpClient, HttpResponse};
use homework_bot::{build_engine, Config, Credentials, HomeworkBotError};

use crate::world::HomeworkBotWorld;

/// A recorded POST to the messaging API
#[derive(Debug, Clone)]
pub struct SentForm {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl SentForm {
    fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP client serving one canned answer for every GET and recording POSTs
#[derive(Debug)]
pub struct ScriptedHttpClient {
    get_answer: Result<HttpResponse, String>,
    post_status: Mutex<u16>,
    posts: Mutex<Vec<SentForm>>,
}

impl ScriptedHttpClient {
    fn answering(status: u16, body: impl Into<String>) -> Self {
        Self {
            get_answer: Ok(HttpResponse {
                status,
                body: body.into(),
            }),
            post_status: Mutex::new(200),
            posts: Mutex::new(Vec::new()),
        }
    }

    fn unreachable() -> Self {
        Self {
            get_answer: Err("connection refused".to_string()),
            post_status: Mutex::new(200),
            posts: Mutex::new(Vec::new()),
        }
    }

    fn posts(&self) -> Vec<SentForm> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        self.get_answer.clone().map_err(HomeworkBotError::Http)
    }

    async fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        self.posts.lock().unwrap().push(SentForm {
            url: url.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        Ok(HttpResponse {
            status: *self.post_status.lock().unwrap(),
            body: "{}".to_string(),
        })
    }
}

fn test_credentials() -> Credentials {
    Credentials {
        practicum_token: "practicum-token".to_string(),
        telegram_token: "123:abc".to_string(),
        telegram_chat_id: "42".to_string(),
    }
}

fn homework_body(name: &str, status: &str) -> String {
    serde_json::json!({
        "homeworks": [{"homework_name": name, "status": status}],
        "current_date": 1000
    })
    .to_string()
}

fn sent_texts(world: &HomeworkBotWorld) -> Vec<String> {
    let http = world.http.as_ref().expect("http client not set");
    http.posts()
        .iter()
        .filter_map(|form| form.param("text").map(str::to_string))
        .collect()
}

#[given(expr = "the review API answers 200 with homework {string} in status {string}")]
fn api_answers_homework(world: &mut HomeworkBotWorld, name: String, status: String) {
    world.http = Some(Arc::new(ScriptedHttpClient::answering(
        200,
        homework_body(&name, &status),
    )));
}

#[given("the review API answers 200 with no homeworks")]
fn api_answers_empty(world: &mut HomeworkBotWorld) {
    world.http = Some(Arc::new(ScriptedHttpClient::answering(
        200,
        r#"{"homeworks": [], "current_date": 1000}"#,
    )));
}

#[given(expr = "the review API answers 200 with body {string}")]
fn api_answers_body(world: &mut HomeworkBotWorld, body: String) {
    world.http = Some(Arc::new(ScriptedHttpClient::answering(200, body)));
}

#[given(expr = "the review API answers with status {int}")]
fn api_answers_status(world: &mut HomeworkBotWorld, status: u16) {
    world.http = Some(Arc::new(ScriptedHttpClient::answering(
        status,
        "Internal Server Error",
    )));
}

#[given("the review API is unreachable")]
fn api_unreachable(world: &mut HomeworkBotWorld) {
    world.http = Some(Arc::new(ScriptedHttpClient::unreachable()));
}

#[given("the chat rejects messages")]
fn chat_rejects(world: &mut HomeworkBotWorld) {
    let http = world.http.as_ref().expect("http client not set");
    *http.post_status.lock().unwrap() = 403;
}

#[given(expr = "the time cursor starts at {int}")]
fn cursor_starts_at(world: &mut HomeworkBotWorld, cursor: i64) {
    world.start_cursor = Some(cursor);
}

async fn run_cycles(world: &mut HomeworkBotWorld, count: usize) {
    if world.engine.is_none() {
        let http = Arc::clone(world.http.as_ref().expect("http client not set"));
        let mut engine = build_engine(&Config::default(), &test_credentials(), http)
            .expect("engine should build");
        if let Some(cursor) = world.start_cursor {
            engine = engine.with_cursor(cursor);
        }
        world.engine = Some(engine);
    }

    world.cycle_started_at = Some(chrono::Utc::now().timestamp());
    let engine = world.engine.as_mut().expect("engine not built");
    for _ in 0..count {
        let outcome = engine.run_cycle().await;
        world.outcomes.push(outcome);
    }
}

#[when("one poll cycle runs")]
async fn one_cycle(world: &mut HomeworkBotWorld) {
    run_cycles(world, 1).await;
}

#[when(expr = "{int} poll cycles run")]
async fn many_cycles(world: &mut HomeworkBotWorld, count: usize) {
    run_cycles(world, count).await;
}

#[then("no message is sent")]
fn no_message(world: &mut HomeworkBotWorld) {
    assert!(sent_texts(world).is_empty());
    assert!(world
        .outcomes
        .iter()
        .all(|outcome| *outcome == CycleOutcome::NoChange));
}

#[then(expr = "exactly {int} message(s) is/are sent")]
fn exactly_n_messages(world: &mut HomeworkBotWorld, count: usize) {
    assert_eq!(sent_texts(world).len(), count, "{:?}", sent_texts(world));
}

#[then(expr = "{int} delivery attempts were made")]
fn delivery_attempts(world: &mut HomeworkBotWorld, count: usize) {
    assert_eq!(sent_texts(world).len(), count);
    assert!(world
        .outcomes
        .iter()
        .all(|outcome| matches!(outcome, CycleOutcome::Notified(_))));
}

#[then(expr = "message {int} is {string}")]
fn message_is(world: &mut HomeworkBotWorld, index: usize, expected: String) {
    let texts = sent_texts(world);
    assert_eq!(texts.get(index - 1), Some(&expected), "{:?}", texts);
}

#[then(expr = "message {int} contains {string}")]
fn message_contains(world: &mut HomeworkBotWorld, index: usize, expected: String) {
    let texts = sent_texts(world);
    let text = texts.get(index - 1).expect("message not sent");
    assert!(text.contains(&expected), "{text}");
}

#[then(expr = "every message goes to chat {string}")]
fn messages_go_to_chat(world: &mut HomeworkBotWorld, chat_id: String) {
    let http = world.http.as_ref().expect("http client not set");
    let posts = http.posts();
    assert!(!posts.is_empty());
    for form in posts {
        assert_eq!(form.url, "https://api.telegram.org/bot123:abc/sendMessage");
        assert_eq!(form.param("chat_id"), Some(chat_id.as_str()));
    }
}

#[then("the next fetch starts from the current time")]
fn cursor_is_now(world: &mut HomeworkBotWorld) {
    let engine = world.engine.as_ref().expect("engine not built");
    let started = world.cycle_started_at.expect("no cycle ran");
    assert!(engine.cursor() >= started);
    assert_ne!(Some(engine.cursor()), world.start_cursor);
}
