//! Generation requests and the remote generation client.

pub mod client;
pub mod request;

pub use client::{GenerationClient, GenerationResponse, HttpGenerationClient, REQUEST_TIMEOUT};
pub use request::{
    CommitStyle, GenerationOptions, GenerationRequest, MAX_ALTERNATIVES, MIN_ALTERNATIVES,
    build_request,
};
