//! Core traits for the hosting API client
//!
//! - [`ApiGateway`]: Issue authenticated requests against the provider REST API

pub mod api_gateway;

pub use api_gateway::{ApiGateway, HttpMethod};
