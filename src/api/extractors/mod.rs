//! Custom extractors for request validation.

mod action_json;

pub use action_json::ActionJson;
