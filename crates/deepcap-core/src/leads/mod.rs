//! Lead capture pipeline.
//!
//! Turns a web page URL into a normalized lead draft: the serverless
//! extractor produces raw metadata (title, date, publisher and author names),
//! the API server resolves the raw names into organization records, and the
//! auto-fill merge folds whatever was found into a draft without clobbering
//! fields the extractor could not produce.

mod client;
mod models;

pub use client::WebInfoClient;
pub use models::{
    LeadConfidentiality, LeadDraft, LeadPriority, LeadSourceType, Organization, RawWebInfo,
    WebInfo,
};
