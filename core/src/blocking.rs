//! Blocking client: each call holds the calling thread for the whole round trip.

use tracing::debug;

use crate::client::QueryBuilder;
use crate::config::ClientBuilder;
use crate::endpoint::{Api, ConversationalApi, Endpoint, FullResultsApi, ShortApi, SimpleApi, SpokenApi};
use crate::error::QueryError;
use crate::http::{HttpRequest, HttpResponse};
use crate::options::{AnswerOptions, ConversationalOptions, FullResultsOptions, SimpleOptions};
use crate::params::Params;
use crate::types::{ConversationalResults, FullResults, QueryResult, SimpleImage};

/// Synchronous client for the query endpoints.
#[derive(Debug, Clone)]
pub struct Client {
    builder: QueryBuilder,
}

impl Client {
    pub fn new(appid: impl Into<String>) -> Self {
        Self {
            builder: QueryBuilder::new(appid),
        }
    }

    pub fn builder(appid: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(appid)
    }

    pub fn appid(&self) -> &str {
        self.builder.appid()
    }

    pub fn query_builder(&self) -> &QueryBuilder {
        &self.builder
    }

    /// Low-level dispatch. `endpoint` is an [`Endpoint`] or its name; an
    /// unknown name fails with `TypeConflict` before anything is sent.
    pub fn query<E>(&self, endpoint: E, params: Params) -> Result<QueryResult, QueryError>
    where
        E: TryInto<Endpoint>,
        QueryError: From<<E as TryInto<Endpoint>>::Error>,
    {
        let endpoint: Endpoint = endpoint.try_into()?;
        let request = self.builder.build(endpoint, &params)?;
        let response = send(&request)?;
        endpoint.format_results(response)
    }

    pub fn query_full_results(&self, input: &str, options: FullResultsOptions) -> Result<FullResults, QueryError> {
        let request = self.builder.build_full_results(input, options)?;
        execute::<FullResultsApi>(&request)
    }

    pub fn query_conversational(
        &self,
        i: &str,
        options: ConversationalOptions,
    ) -> Result<ConversationalResults, QueryError> {
        let request = self.builder.build_conversational(i, options)?;
        execute::<ConversationalApi>(&request)
    }

    /// Continue the conversation `previous` belongs to, at the host it named.
    pub fn query_conversational_followup(
        &self,
        previous: &ConversationalResults,
        i: &str,
        options: ConversationalOptions,
    ) -> Result<ConversationalResults, QueryError> {
        let request = self.builder.build_followup(previous, i, options)?;
        execute::<ConversationalApi>(&request)
    }

    pub fn query_simple(&self, i: &str, options: SimpleOptions) -> Result<SimpleImage, QueryError> {
        let request = self.builder.build_simple(i, options)?;
        execute::<SimpleApi>(&request)
    }

    pub fn query_short(&self, i: &str, options: AnswerOptions) -> Result<String, QueryError> {
        let request = self.builder.build_short(i, options)?;
        execute::<ShortApi>(&request)
    }

    pub fn query_spoken(&self, i: &str, options: AnswerOptions) -> Result<String, QueryError> {
        let request = self.builder.build_spoken(i, options)?;
        execute::<SpokenApi>(&request)
    }
}

impl From<QueryBuilder> for Client {
    fn from(builder: QueryBuilder) -> Self {
        Self { builder }
    }
}

fn execute<A: Api>(request: &HttpRequest) -> Result<A::Output, QueryError> {
    let response = send(request)?;
    A::format_results(response)
}

/// Perform the GET. Status codes are returned as data so the endpoint
/// formatter decides what a non-2xx answer means.
fn send(request: &HttpRequest) -> Result<HttpResponse, QueryError> {
    debug!(endpoint = %request.endpoint, "sending blocking query");
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    let response = agent.get(request.url.as_str()).call()?;
    let response = HttpResponse::from_ureq(&request.url, response)?;
    debug!(endpoint = %request.endpoint, status = response.status, "received response");
    Ok(response)
}
