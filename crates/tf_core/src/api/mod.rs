pub mod json_api;

pub use json_api::{
    simulate_batch_json, simulate_match_json, BatchRequest, BatchResponse, MatchRequest,
    MatchResponse, SCHEMA_VERSION,
};
