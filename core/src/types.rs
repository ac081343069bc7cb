//! Result models produced by the endpoint formatters.
//!
//! # Design
//! Only the fields the client needs are modelled; unknown JSON members are
//! ignored so additions on the service side do not break parsing. Every
//! formatter first maps non-2xx statuses to `QueryError::HttpStatus`.

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::http::HttpResponse;
use crate::params::Params;

/// Output of the low-level `query` entry points.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    FullResults(FullResults),
    Image(SimpleImage),
    Text(String),
    Conversational(ConversationalResults),
}

/// Parsed `queryresult` of the full results endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullResults {
    /// False when the service could not interpret the input.
    pub success: bool,
    pub num_pods: u32,
    pub pods: Vec<Pod>,
}

impl FullResults {
    pub fn pod(&self, id: &str) -> Option<&Pod> {
        self.pods.iter().find(|p| p.id == id)
    }

    /// The pod flagged as primary, falling back to the `Result` pod.
    pub fn primary(&self) -> Option<&Pod> {
        self.pods
            .iter()
            .find(|p| p.primary)
            .or_else(|| self.pod("Result"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pod {
    pub title: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub scanner: String,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub subpods: Vec<Subpod>,
}

impl Pod {
    /// Plaintext of the first subpod that has any.
    pub fn plaintext(&self) -> Option<&str> {
        self.subpods
            .iter()
            .filter_map(|s| s.plaintext.as_deref())
            .find(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subpod {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub plaintext: Option<String>,
    #[serde(default)]
    pub img: Option<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// Image returned by the simple endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// One turn of a conversation plus the routing state for the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationalResults {
    pub result: String,
    pub conversation_id: String,
    pub host: String,
    pub s: Option<String>,
    /// Endpoint URL the follow-up turn must be sent to.
    pub continuation_url: String,
}

impl ConversationalResults {
    /// Parameters the service expects to be replayed on the next turn.
    pub fn continuation_params(&self) -> Params {
        Params::new()
            .with("conversationID", self.conversation_id.as_str())
            .with_opt("s", self.s.as_deref())
    }
}

#[derive(Deserialize)]
struct Envelope {
    queryresult: RawQueryResult,
}

#[derive(Deserialize)]
struct RawQueryResult {
    #[serde(default)]
    success: bool,
    // `false`, or an object with `code` and `msg` when the query failed.
    #[serde(default)]
    error: serde_json::Value,
    #[serde(default)]
    numpods: u32,
    #[serde(default)]
    pods: Vec<Pod>,
}

#[derive(Deserialize)]
struct RawConversation {
    result: Option<String>,
    error: Option<String>,
    #[serde(rename = "conversationID")]
    conversation_id: Option<String>,
    host: Option<String>,
    #[serde(default)]
    s: Option<serde_json::Value>,
}

pub(crate) fn parse_full_results(response: HttpResponse) -> Result<FullResults, QueryError> {
    let response = response.error_for_status()?;
    let envelope: Envelope = serde_json::from_slice(&response.body)?;
    let raw = envelope.queryresult;

    if let Some(message) = raw.error.get("msg").and_then(|m| m.as_str()) {
        return Err(QueryError::Api {
            message: message.to_string(),
        });
    }

    Ok(FullResults {
        success: raw.success,
        num_pods: raw.numpods,
        pods: raw.pods,
    })
}

pub(crate) fn parse_simple_image(response: HttpResponse) -> Result<SimpleImage, QueryError> {
    let response = response.error_for_status()?;
    let content_type = response
        .content_type()
        .unwrap_or_default()
        .to_string();
    if !content_type.starts_with("image/") {
        return Err(QueryError::Format(format!(
            "expected an image, got content type `{content_type}`"
        )));
    }
    Ok(SimpleImage {
        content_type,
        bytes: response.body,
    })
}

pub(crate) fn parse_text(response: HttpResponse) -> Result<String, QueryError> {
    let response = response.error_for_status()?;
    Ok(response.text()?.to_string())
}

pub(crate) fn parse_conversational(response: HttpResponse) -> Result<ConversationalResults, QueryError> {
    let response = response.error_for_status()?;
    let raw: RawConversation = serde_json::from_slice(&response.body)?;

    if let Some(message) = raw.error {
        return Err(QueryError::Api { message });
    }

    let result = raw.result.ok_or_else(|| missing("result"))?;
    let conversation_id = raw.conversation_id.ok_or_else(|| missing("conversationID"))?;
    let host = raw.host.ok_or_else(|| missing("host"))?;
    let s = match raw.s {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    };

    // Follow-ups keep the scheme the current turn was answered over.
    let scheme = url::Url::parse(&response.url)
        .map(|u| u.scheme().to_string())
        .unwrap_or_else(|_| "https".to_string());
    let continuation_url = format!("{scheme}://{host}/api/v1/conversation.jsp");

    Ok(ConversationalResults {
        result,
        conversation_id,
        host,
        s,
        continuation_url,
    })
}

fn missing(field: &str) -> QueryError {
    QueryError::Format(format!("missing `{field}` in conversational response"))
}
