//! Client core for the Wolfram|Alpha query endpoints.
//!
//! # Overview
//! Composes query parameters for the full results, simple image, short
//! answer, spoken answer and conversational endpoints, sends them as GET
//! requests and hands each response to the endpoint's formatter.
//!
//! # Design
//! - `QueryBuilder` merges the credential, the endpoint's fixed parameters
//!   and the caller's parameters and builds the request URL. It never
//!   touches the network.
//! - `Client` executes requests on the calling thread (`ureq`); `AsyncClient`
//!   executes them on the caller's async runtime (`reqwest`), with a fresh
//!   session per call.
//! - Endpoints are a closed enum; the typed formatter pair for each lives on
//!   the `Api` trait.
//!
//! ```no_run
//! use wolfram_core::{AnswerOptions, Client};
//!
//! let client = Client::new("DEMO");
//! let answer = client.query_short("distance to the moon", AnswerOptions::default())?;
//! println!("{answer}");
//! # Ok::<(), wolfram_core::QueryError>(())
//! ```

pub mod async_client;
pub mod blocking;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod options;
pub mod params;
pub mod request;
pub mod types;

pub use async_client::AsyncClient;
pub use blocking::Client;
pub use client::QueryBuilder;
pub use config::ClientBuilder;
pub use endpoint::{Api, ConversationalApi, Descriptor, Endpoint, FullResultsApi, ShortApi, SimpleApi, SpokenApi};
pub use error::QueryError;
pub use http::{HttpRequest, HttpResponse};
pub use options::{
    AnswerOptions, ConversationalOptions, FullResultsOptions, ShortOptions, SimpleOptions, SpokenOptions, Units,
};
pub use params::{ParamValue, Params, CREDENTIAL_KEY};
pub use request::DEFAULT_BASE_URL;
pub use types::{ConversationalResults, FullResults, Image, Pod, QueryResult, SimpleImage, Subpod};
