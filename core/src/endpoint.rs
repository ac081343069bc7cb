//! Endpoint descriptors and their result formatters.
//!
//! # Design
//! The service's query types form a closed set, so they are an enum rather
//! than open-ended descriptor objects. Each variant carries its API version,
//! path and fixed parameters through [`Endpoint::descriptor`]. The typed
//! formatter pair lives on the [`Api`] trait, implemented by one marker type
//! per endpoint so the facade methods return the endpoint's own output type.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use crate::error::QueryError;
use crate::http::HttpResponse;
use crate::types::{self, ConversationalResults, FullResults, QueryResult, SimpleImage};

/// Static metadata for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub version: u8,
    pub path: &'static str,
    /// Parameters the endpoint always sends. Callers cannot override them.
    pub fixed_params: &'static [(&'static str, &'static str)],
}

/// One query type offered by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    FullResults,
    Simple,
    Short,
    Spoken,
    Conversational,
}

impl Endpoint {
    pub const ALL: [Endpoint; 5] = [
        Endpoint::FullResults,
        Endpoint::Simple,
        Endpoint::Short,
        Endpoint::Spoken,
        Endpoint::Conversational,
    ];

    pub fn descriptor(self) -> Descriptor {
        match self {
            Endpoint::FullResults => Descriptor {
                version: 2,
                path: "query",
                fixed_params: &[("output", "json")],
            },
            Endpoint::Simple => Descriptor {
                version: 1,
                path: "simple",
                fixed_params: &[],
            },
            Endpoint::Short => Descriptor {
                version: 1,
                path: "result",
                fixed_params: &[],
            },
            Endpoint::Spoken => Descriptor {
                version: 1,
                path: "spoken",
                fixed_params: &[],
            },
            Endpoint::Conversational => Descriptor {
                version: 1,
                path: "conversation.jsp",
                fixed_params: &[],
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Endpoint::FullResults => "full_results",
            Endpoint::Simple => "simple",
            Endpoint::Short => "short",
            Endpoint::Spoken => "spoken",
            Endpoint::Conversational => "conversational",
        }
    }

    /// Name of the parameter carrying the query text.
    pub fn input_key(self) -> &'static str {
        match self {
            Endpoint::FullResults => "input",
            _ => "i",
        }
    }

    /// Interpret `response` with this endpoint's blocking formatter.
    pub fn format_results(self, response: HttpResponse) -> Result<QueryResult, QueryError> {
        match self {
            Endpoint::FullResults => FullResultsApi::format_results(response).map(QueryResult::FullResults),
            Endpoint::Simple => SimpleApi::format_results(response).map(QueryResult::Image),
            Endpoint::Short => ShortApi::format_results(response).map(QueryResult::Text),
            Endpoint::Spoken => SpokenApi::format_results(response).map(QueryResult::Text),
            Endpoint::Conversational => {
                ConversationalApi::format_results(response).map(QueryResult::Conversational)
            }
        }
    }

    /// Interpret `response` with this endpoint's non-blocking formatter.
    pub async fn format_results_async(self, response: reqwest::Response) -> Result<QueryResult, QueryError> {
        match self {
            Endpoint::FullResults => FullResultsApi::format_results_async(response)
                .await
                .map(QueryResult::FullResults),
            Endpoint::Simple => SimpleApi::format_results_async(response)
                .await
                .map(QueryResult::Image),
            Endpoint::Short => ShortApi::format_results_async(response)
                .await
                .map(QueryResult::Text),
            Endpoint::Spoken => SpokenApi::format_results_async(response)
                .await
                .map(QueryResult::Text),
            Endpoint::Conversational => ConversationalApi::format_results_async(response)
                .await
                .map(QueryResult::Conversational),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.name() == s)
            .ok_or_else(|| QueryError::TypeConflict(s.to_string()))
    }
}

impl TryFrom<&str> for Endpoint {
    type Error = QueryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Typed formatter pair for one endpoint.
///
/// Both formatters must produce equal values for equal wire responses; the
/// non-blocking one only differs in how it reads the body.
pub trait Api {
    type Output;

    const ENDPOINT: Endpoint;

    fn format_results(response: HttpResponse) -> Result<Self::Output, QueryError>;

    fn format_results_async(
        response: reqwest::Response,
    ) -> impl Future<Output = Result<Self::Output, QueryError>> + Send {
        async move {
            let raw = HttpResponse::from_reqwest(response).await?;
            Self::format_results(raw)
        }
    }
}

/// `v2/query`: every pod the service produced for the input.
#[derive(Debug, Clone, Copy)]
pub struct FullResultsApi;

/// `v1/simple`: a single rendered image.
#[derive(Debug, Clone, Copy)]
pub struct SimpleApi;

/// `v1/result`: a short plain-text answer.
#[derive(Debug, Clone, Copy)]
pub struct ShortApi;

/// `v1/spoken`: a sentence suitable for speech output.
#[derive(Debug, Clone, Copy)]
pub struct SpokenApi;

/// `v1/conversation.jsp`: one turn of a dialogue.
#[derive(Debug, Clone, Copy)]
pub struct ConversationalApi;

impl Api for FullResultsApi {
    type Output = FullResults;
    const ENDPOINT: Endpoint = Endpoint::FullResults;

    fn format_results(response: HttpResponse) -> Result<FullResults, QueryError> {
        types::parse_full_results(response)
    }
}

impl Api for SimpleApi {
    type Output = SimpleImage;
    const ENDPOINT: Endpoint = Endpoint::Simple;

    fn format_results(response: HttpResponse) -> Result<SimpleImage, QueryError> {
        types::parse_simple_image(response)
    }
}

impl Api for ShortApi {
    type Output = String;
    const ENDPOINT: Endpoint = Endpoint::Short;

    fn format_results(response: HttpResponse) -> Result<String, QueryError> {
        types::parse_text(response)
    }
}

impl Api for SpokenApi {
    type Output = String;
    const ENDPOINT: Endpoint = Endpoint::Spoken;

    fn format_results(response: HttpResponse) -> Result<String, QueryError> {
        types::parse_text(response)
    }
}

impl Api for ConversationalApi {
    type Output = ConversationalResults;
    const ENDPOINT: Endpoint = Endpoint::Conversational;

    fn format_results(response: HttpResponse) -> Result<ConversationalResults, QueryError> {
        types::parse_conversational(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for endpoint in Endpoint::ALL {
            assert_eq!(endpoint.name().parse::<Endpoint>().unwrap(), endpoint);
        }
    }

    #[test]
    fn unknown_name_is_a_type_conflict() {
        let err = "widget".parse::<Endpoint>().unwrap_err();
        assert!(matches!(err, QueryError::TypeConflict(ref name) if name == "widget"));
    }

    #[test]
    fn full_results_is_the_only_v2_endpoint() {
        let v2: Vec<_> = Endpoint::ALL
            .into_iter()
            .filter(|e| e.descriptor().version == 2)
            .collect();
        assert_eq!(v2, vec![Endpoint::FullResults]);
        assert_eq!(Endpoint::FullResults.descriptor().fixed_params, &[("output", "json")]);
    }

    #[test]
    fn marker_types_point_at_their_endpoint() {
        assert_eq!(FullResultsApi::ENDPOINT, Endpoint::FullResults);
        assert_eq!(SimpleApi::ENDPOINT, Endpoint::Simple);
        assert_eq!(ShortApi::ENDPOINT, Endpoint::Short);
        assert_eq!(SpokenApi::ENDPOINT, Endpoint::Spoken);
        assert_eq!(ConversationalApi::ENDPOINT, Endpoint::Conversational);
    }

    #[test]
    fn generic_formatter_wraps_typed_output() {
        let response = HttpResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "text/plain".to_string())],
            body: b"4".to_vec(),
            url: "https://api.wolframalpha.com/v1/result".to_string(),
        };
        let result = Endpoint::Short.format_results(response).unwrap();
        assert_eq!(result, QueryResult::Text("4".to_string()));
    }
}
