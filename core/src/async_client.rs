//! Non-blocking client.
//!
//! # Design
//! Requests are composed by the same `QueryBuilder` as the blocking client;
//! only execution differs. Every call opens its own `reqwest::Client`
//! session and drops it when the call returns, whether the request or the
//! formatter succeeded or not. No pool is shared across calls.

use tracing::debug;

use crate::client::QueryBuilder;
use crate::config::ClientBuilder;
use crate::endpoint::{Api, ConversationalApi, Endpoint, FullResultsApi, ShortApi, SimpleApi, SpokenApi};
use crate::error::QueryError;
use crate::http::HttpRequest;
use crate::options::{AnswerOptions, ConversationalOptions, FullResultsOptions, SimpleOptions};
use crate::params::Params;
use crate::types::{ConversationalResults, FullResults, QueryResult, SimpleImage};

/// Asynchronous client for the query endpoints.
#[derive(Debug, Clone)]
pub struct AsyncClient {
    builder: QueryBuilder,
}

impl AsyncClient {
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

    /// Low-level dispatch, see [`crate::Client::query`].
    pub async fn query<E>(&self, endpoint: E, params: Params) -> Result<QueryResult, QueryError>
    where
        E: TryInto<Endpoint>,
        QueryError: From<<E as TryInto<Endpoint>>::Error>,
    {
        let endpoint: Endpoint = endpoint.try_into()?;
        let request = self.builder.build(endpoint, &params)?;

        let session = open_session()?;
        let response = send(&session, &request).await?;
        endpoint.format_results_async(response).await
    }

    pub async fn query_full_results(
        &self,
        input: &str,
        options: FullResultsOptions,
    ) -> Result<FullResults, QueryError> {
        let request = self.builder.build_full_results(input, options)?;
        execute::<FullResultsApi>(&request).await
    }

    pub async fn query_conversational(
        &self,
        i: &str,
        options: ConversationalOptions,
    ) -> Result<ConversationalResults, QueryError> {
        let request = self.builder.build_conversational(i, options)?;
        execute::<ConversationalApi>(&request).await
    }

    pub async fn query_conversational_followup(
        &self,
        previous: &ConversationalResults,
        i: &str,
        options: ConversationalOptions,
    ) -> Result<ConversationalResults, QueryError> {
        let request = self.builder.build_followup(previous, i, options)?;
        execute::<ConversationalApi>(&request).await
    }

    pub async fn query_simple(&self, i: &str, options: SimpleOptions) -> Result<SimpleImage, QueryError> {
        let request = self.builder.build_simple(i, options)?;
        execute::<SimpleApi>(&request).await
    }

    pub async fn query_short(&self, i: &str, options: AnswerOptions) -> Result<String, QueryError> {
        let request = self.builder.build_short(i, options)?;
        execute::<ShortApi>(&request).await
    }

    pub async fn query_spoken(&self, i: &str, options: AnswerOptions) -> Result<String, QueryError> {
        let request = self.builder.build_spoken(i, options)?;
        execute::<SpokenApi>(&request).await
    }
}

impl From<QueryBuilder> for AsyncClient {
    fn from(builder: QueryBuilder) -> Self {
        Self { builder }
    }
}

async fn execute<A: Api>(request: &HttpRequest) -> Result<A::Output, QueryError> {
    let session = open_session()?;
    let response = send(&session, request).await?;
    A::format_results_async(response).await
}

fn open_session() -> Result<reqwest::Client, QueryError> {
    Ok(reqwest::Client::builder().build()?)
}

async fn send(session: &reqwest::Client, request: &HttpRequest) -> Result<reqwest::Response, QueryError> {
    debug!(endpoint = %request.endpoint, "sending async query");
    let response = session.get(&request.url).send().await?;
    debug!(endpoint = %request.endpoint, status = response.status().as_u16(), "received response");
    Ok(response)
}
