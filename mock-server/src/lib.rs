use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Credential the mock treats as revoked.
pub const INVALID_APPID: &str = "INVALID";

/// Bytes served by the simple endpoint.
pub const GIF_BYTES: &[u8] = b"GIF89a\x01\x00\x01\x00\x80\x00\x00\xff\xff\xff\x00\x00\x00;";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    pub result: String,
    #[serde(rename = "conversationID")]
    pub conversation_id: String,
    pub host: String,
    pub s: String,
}

/// Turns answered so far, per conversation ID.
pub type Conversations = Arc<RwLock<HashMap<String, u32>>>;

type QueryPairs = Query<Vec<(String, String)>>;

pub fn app() -> Router {
    let conversations: Conversations = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/v1/result", get(short_answer))
        .route("/v1/spoken", get(spoken_answer))
        .route("/v1/simple", get(simple_image))
        .route("/v2/query", get(full_results))
        .route("/v1/conversation.jsp", get(conversation))
        .route("/api/v1/conversation.jsp", get(conversation))
        .with_state(conversations)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Known inputs and their short answers.
pub fn answer(input: &str) -> Option<&'static str> {
    match input.trim().to_lowercase().as_str() {
        "2+2" | "2 + 2" => Some("4"),
        "pi" => Some("3.14159"),
        "distance to the moon" => Some("about 384400 kilometers"),
        "hello" => Some("Hello, human."),
        _ => None,
    }
}

/// Collect query pairs, refusing a parameter name sent more than once.
fn unique_params(pairs: Vec<(String, String)>) -> Result<HashMap<String, String>, Response> {
    let mut params = HashMap::new();
    for (key, value) in pairs {
        if params.contains_key(&key) {
            return Err(text(StatusCode::BAD_REQUEST, &format!("Duplicate parameter: {key}")));
        }
        params.insert(key, value);
    }
    Ok(params)
}

fn text(status: StatusCode, body: &str) -> Response {
    (status, [(header::CONTENT_TYPE, "text/plain;charset=utf-8")], body.to_string()).into_response()
}

/// Shared checks of the v1 endpoints: credential and input present.
fn v1_input(pairs: Vec<(String, String)>) -> Result<(HashMap<String, String>, String), Response> {
    let params = unique_params(pairs)?;
    match params.get("appid").map(String::as_str) {
        None | Some("") | Some(INVALID_APPID) => {
            return Err(text(StatusCode::FORBIDDEN, "Error 1: Invalid appid"));
        }
        Some(_) => {}
    }
    let input = match params.get("i") {
        Some(i) if !i.is_empty() => i.clone(),
        _ => return Err(text(StatusCode::BAD_REQUEST, "Error 2: Appid missing or no input")),
    };
    Ok((params, input))
}

async fn short_answer(Query(pairs): QueryPairs) -> Response {
    let (_, input) = match v1_input(pairs) {
        Ok(ok) => ok,
        Err(resp) => return resp,
    };
    match answer(&input) {
        Some(a) => text(StatusCode::OK, a),
        None => text(StatusCode::NOT_IMPLEMENTED, "No short answer available"),
    }
}

async fn spoken_answer(Query(pairs): QueryPairs) -> Response {
    let (_, input) = match v1_input(pairs) {
        Ok(ok) => ok,
        Err(resp) => return resp,
    };
    match answer(&input) {
        Some(a) => text(StatusCode::OK, &format!("The answer is {a}")),
        None => text(StatusCode::NOT_IMPLEMENTED, "Wolfram Alpha did not understand your input"),
    }
}

async fn simple_image(Query(pairs): QueryPairs) -> Response {
    let (_, input) = match v1_input(pairs) {
        Ok(ok) => ok,
        Err(resp) => return resp,
    };
    match answer(&input) {
        Some(_) => (StatusCode::OK, [(header::CONTENT_TYPE, "image/gif")], GIF_BYTES).into_response(),
        None => text(StatusCode::NOT_IMPLEMENTED, "Wolfram|Alpha did not understand your input"),
    }
}

async fn full_results(Query(pairs): QueryPairs) -> Response {
    let params = match unique_params(pairs) {
        Ok(params) => params,
        Err(resp) => return resp,
    };
    if params.get("output").map(String::as_str) != Some("json") {
        return text(StatusCode::BAD_REQUEST, "Only output=json is supported");
    }
    match params.get("appid").map(String::as_str) {
        None | Some("") | Some(INVALID_APPID) => {
            return Json(json!({
                "queryresult": {
                    "success": false,
                    "error": {"code": "1", "msg": "Invalid appid"},
                    "numpods": 0
                }
            }))
            .into_response();
        }
        Some(_) => {}
    }

    let input = params.get("input").cloned().unwrap_or_default();
    let Some(result) = answer(&input) else {
        return Json(json!({
            "queryresult": {"success": false, "error": false, "numpods": 0}
        }))
        .into_response();
    };

    let formats: Vec<&str> = params
        .get("format")
        .map(|f| f.split(',').collect())
        .unwrap_or_else(|| vec!["plaintext", "image"]);
    let subpod = |plaintext: &str| {
        let mut subpod = json!({"title": ""});
        if formats.contains(&"plaintext") {
            subpod["plaintext"] = json!(plaintext);
        }
        if formats.contains(&"image") {
            subpod["img"] = json!({
                "src": "https://localhost/mock.gif",
                "alt": plaintext,
                "width": 40,
                "height": 18
            });
        }
        subpod
    };

    Json(json!({
        "queryresult": {
            "success": true,
            "error": false,
            "numpods": 2,
            "pods": [
                {
                    "title": "Input interpretation",
                    "id": "Input",
                    "scanner": "Identity",
                    "position": 100,
                    "subpods": [subpod(input.as_str())]
                },
                {
                    "title": "Result",
                    "id": "Result",
                    "scanner": "Simplification",
                    "position": 200,
                    "primary": true,
                    "subpods": [subpod(result)]
                }
            ]
        }
    }))
    .into_response()
}

async fn conversation(
    State(conversations): State<Conversations>,
    headers: HeaderMap,
    Query(pairs): QueryPairs,
) -> Response {
    let (params, input) = match v1_input(pairs) {
        Ok(ok) => ok,
        Err(resp) => return resp,
    };
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost")
        .to_string();

    let mut conversations = conversations.write().await;
    let (conversation_id, turn) = match params.get("conversationID") {
        None => (Uuid::new_v4().to_string(), 1),
        Some(id) => {
            let Some(turns) = conversations.get(id) else {
                return Json(json!({"error": "Conversation not found"})).into_response();
            };
            if params.get("s") != Some(&turns.to_string()) {
                return Json(json!({"error": "Conversation state mismatch"})).into_response();
            }
            (id.clone(), turns + 1)
        }
    };
    conversations.insert(conversation_id.clone(), turn);

    let reply = answer(&input).unwrap_or("I have no idea.");
    Json(Conversation {
        result: format!("Turn {turn}: {reply}"),
        conversation_id,
        host,
        s: turn.to_string(),
    })
    .into_response()
}
