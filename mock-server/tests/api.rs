use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Conversation, GIF_BYTES};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- short / spoken ---

#[tokio::test]
async fn short_answer_for_known_input() {
    let resp = app().oneshot(get("/v1/result?appid=DEMO&i=2%2B2")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "4");
}

#[tokio::test]
async fn short_answer_unknown_input_returns_501() {
    let resp = app()
        .oneshot(get("/v1/result?appid=DEMO&i=meaning+of+life"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body_bytes(resp).await, "No short answer available");
}

#[tokio::test]
async fn missing_appid_returns_403() {
    let resp = app().oneshot(get("/v1/spoken?i=pi")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn spoken_answer_is_a_sentence() {
    let resp = app().oneshot(get("/v1/spoken?appid=DEMO&i=pi")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "The answer is 3.14159");
}

// --- simple ---

#[tokio::test]
async fn simple_returns_gif() {
    let resp = app().oneshot(get("/v1/simple?appid=DEMO&i=pi&width=300")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "image/gif");
    assert_eq!(body_bytes(resp).await, GIF_BYTES);
}

// --- full results ---

#[tokio::test]
async fn full_results_requires_json_output() {
    let resp = app().oneshot(get("/v2/query?appid=DEMO&input=pi")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn full_results_honours_format() {
    let resp = app()
        .oneshot(get("/v2/query?appid=DEMO&output=json&input=pi&format=plaintext"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value = body_json(resp).await;
    let subpod = &json["queryresult"]["pods"][1]["subpods"][0];
    assert_eq!(subpod["plaintext"], "3.14159");
    assert!(subpod.get("img").is_none());
}

#[tokio::test]
async fn full_results_rejects_repeated_format_keys() {
    let resp = app()
        .oneshot(get(
            "/v2/query?appid=DEMO&output=json&input=pi&format=plaintext&format=image",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn full_results_invalid_appid_reports_error_object() {
    let resp = app()
        .oneshot(get("/v2/query?appid=INVALID&output=json&input=pi"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(json["queryresult"]["error"]["msg"], "Invalid appid");
}

// --- conversation lifecycle ---

#[tokio::test]
async fn conversation_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // first turn
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/v1/conversation.jsp?appid=DEMO&i=hello"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let first: Conversation = body_json(resp).await;
    assert_eq!(first.result, "Turn 1: Hello, human.");
    assert_eq!(first.s, "1");
    let id = first.conversation_id;

    // follow-up at the continuation path
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!(
            "/api/v1/conversation.jsp?appid=DEMO&i=pi&conversationID={id}&s=1"
        )))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let second: Conversation = body_json(resp).await;
    assert_eq!(second.conversation_id, id);
    assert_eq!(second.result, "Turn 2: 3.14159");
    assert_eq!(second.s, "2");

    // stale state is refused
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!(
            "/api/v1/conversation.jsp?appid=DEMO&i=pi&conversationID={id}&s=1"
        )))
        .await
        .unwrap();
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(json["error"], "Conversation state mismatch");
}

#[tokio::test]
async fn unknown_conversation_is_an_error_body() {
    let resp = app()
        .oneshot(get("/v1/conversation.jsp?appid=DEMO&i=pi&conversationID=nope&s=1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(json["error"], "Conversation not found");
}
