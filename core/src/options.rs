//! Optional arguments accepted by the facade methods.
//!
//! Each struct names the parameters commonly used with its endpoint. Anything
//! else goes in `extra` and is sent verbatim. Fields left as `None` are
//! stripped before the request is built.

use std::fmt;

use crate::error::QueryError;
use crate::params::{ParamValue, Params};

/// Measurement system for answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Units> for ParamValue {
    fn from(units: Units) -> Self {
        ParamValue::Text(units.as_str().to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FullResultsOptions {
    /// Pod formats, e.g. `["plaintext", "image"]`. Sent comma-joined.
    pub format: Option<Vec<String>>,
    pub extra: Params,
}

#[derive(Debug, Clone, Default)]
pub struct ConversationalOptions {
    pub conversation_id: Option<String>,
    pub s: Option<i64>,
    pub geolocation: Option<String>,
    pub ip: Option<String>,
    pub units: Option<Units>,
    pub extra: Params,
}

#[derive(Debug, Clone, Default)]
pub struct SimpleOptions {
    pub layout: Option<String>,
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub fontsize: Option<u32>,
    pub width: Option<u32>,
    pub units: Option<Units>,
    /// Seconds the service may spend; enforced remotely, not by this client.
    pub timeout: Option<u32>,
    pub extra: Params,
}

/// Options shared by the short and spoken answer endpoints.
#[derive(Debug, Clone, Default)]
pub struct AnswerOptions {
    pub units: Option<Units>,
    pub timeout: Option<u32>,
    pub extra: Params,
}

pub type ShortOptions = AnswerOptions;
pub type SpokenOptions = AnswerOptions;

impl FullResultsOptions {
    pub(crate) fn into_params(self, input: &str) -> Result<Params, QueryError> {
        let named = Params::new()
            .with("input", input)
            .with_opt("format", self.format.map(|formats| formats.join(",")));
        with_extra(named, &self.extra)
    }
}

impl ConversationalOptions {
    pub(crate) fn into_params(self, i: &str) -> Result<Params, QueryError> {
        let named = Params::new()
            .with("i", i)
            .with_opt("conversationID", self.conversation_id)
            .with_opt("s", self.s)
            .with_opt("geolocation", self.geolocation)
            .with_opt("ip", self.ip)
            .with_opt("units", self.units);
        with_extra(named, &self.extra)
    }
}

impl SimpleOptions {
    pub(crate) fn into_params(self, i: &str) -> Result<Params, QueryError> {
        let named = Params::new()
            .with("i", i)
            .with_opt("layout", self.layout)
            .with_opt("background", self.background)
            .with_opt("foreground", self.foreground)
            .with_opt("fontsize", self.fontsize)
            .with_opt("width", self.width)
            .with_opt("units", self.units)
            .with_opt("timeout", self.timeout);
        with_extra(named, &self.extra)
    }
}

impl AnswerOptions {
    pub(crate) fn into_params(self, i: &str) -> Result<Params, QueryError> {
        let named = Params::new()
            .with("i", i)
            .with_opt("units", self.units)
            .with_opt("timeout", self.timeout);
        with_extra(named, &self.extra)
    }
}

fn with_extra(named: Params, extra: &Params) -> Result<Params, QueryError> {
    named.without_nulls().merge_disjoint(&extra.without_nulls())
}
