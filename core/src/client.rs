//! Request composition shared by the blocking and non-blocking clients.
//!
//! # Design
//! `QueryBuilder` holds only the credential and the origin. Each operation
//! has a `build_*` method that applies the facade pre-processing, merges the
//! credential and fixed parameters, and returns an `HttpRequest`, all
//! without touching the network. `Client` and `AsyncClient` wrap it and
//! differ only in how they execute the request.

use crate::endpoint::Endpoint;
use crate::error::QueryError;
use crate::http::HttpRequest;
use crate::options::{AnswerOptions, ConversationalOptions, FullResultsOptions, SimpleOptions};
use crate::params::{merge, Params};
use crate::request::{self, DEFAULT_BASE_URL};
use crate::types::ConversationalResults;

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    appid: String,
    base_url: String,
}

impl QueryBuilder {
    /// Builder against the service's public origin.
    pub fn new(appid: impl Into<String>) -> Self {
        Self {
            appid: appid.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Builder against another origin. A trailing `/` is added when missing.
    pub fn with_base_url(appid: impl Into<String>, base_url: &str) -> Result<Self, QueryError> {
        url::Url::parse(base_url).map_err(|e| QueryError::Config(format!("{base_url}: {e}")))?;
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        Ok(Self {
            appid: appid.into(),
            base_url,
        })
    }

    pub fn appid(&self) -> &str {
        &self.appid
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Merge `params` for `endpoint` and address the request at the origin.
    pub fn build(&self, endpoint: Endpoint, params: &Params) -> Result<HttpRequest, QueryError> {
        let descriptor = endpoint.descriptor();
        let merged = merge(&self.appid, descriptor.fixed_params, params)?;
        let url = request::build_url(&self.base_url, &descriptor, &merged)?;
        Ok(HttpRequest { endpoint, url })
    }

    /// Merge `params` for `endpoint` and address the request at a
    /// provider-issued continuation URL instead of the origin.
    pub fn build_at(
        &self,
        endpoint: Endpoint,
        continuation_url: &str,
        params: &Params,
    ) -> Result<HttpRequest, QueryError> {
        let descriptor = endpoint.descriptor();
        let merged = merge(&self.appid, descriptor.fixed_params, params)?;
        let url = request::build_continuation_url(continuation_url, &merged);
        Ok(HttpRequest { endpoint, url })
    }

    pub fn build_full_results(&self, input: &str, options: FullResultsOptions) -> Result<HttpRequest, QueryError> {
        self.build(Endpoint::FullResults, &options.into_params(input)?)
    }

    pub fn build_conversational(&self, i: &str, options: ConversationalOptions) -> Result<HttpRequest, QueryError> {
        self.build(Endpoint::Conversational, &options.into_params(i)?)
    }

    /// Next turn of the conversation `previous` belongs to. Its continuation
    /// parameters are replayed exactly; a caller option naming the same
    /// parameter is a conflict.
    pub fn build_followup(
        &self,
        previous: &ConversationalResults,
        i: &str,
        options: ConversationalOptions,
    ) -> Result<HttpRequest, QueryError> {
        let params = options
            .into_params(i)?
            .merge_disjoint(&previous.continuation_params().without_nulls())?;
        self.build_at(Endpoint::Conversational, &previous.continuation_url, &params)
    }

    pub fn build_simple(&self, i: &str, options: SimpleOptions) -> Result<HttpRequest, QueryError> {
        self.build(Endpoint::Simple, &options.into_params(i)?)
    }

    pub fn build_short(&self, i: &str, options: AnswerOptions) -> Result<HttpRequest, QueryError> {
        self.build(Endpoint::Short, &options.into_params(i)?)
    }

    pub fn build_spoken(&self, i: &str, options: AnswerOptions) -> Result<HttpRequest, QueryError> {
        self.build(Endpoint::Spoken, &options.into_params(i)?)
    }
}
