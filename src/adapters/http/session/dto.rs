//! HTTP DTOs for session endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::decision::CriterionInput;
use crate::application::DecisionSession;
use crate::domain::decision::{ProductDetail, ScoreMatrix};

/// Full session state sent by clients on save.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveSessionRequest {
    pub topic: String,
    pub products: Vec<String>,
    pub criteria: Vec<CriterionInput>,
    pub scores: ScoreMatrix,
    pub product_details: Vec<ProductDetail>,
}

/// A session with its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub session: DecisionSession,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_request_reads_camel_case_and_defaults() {
        let req: SaveSessionRequest = serde_json::from_str(
            r#"{"topic":"laptops","productDetails":[{"product":"A","byCriterion":{"Price":"cheap"}}]}"#,
        )
        .unwrap();

        assert_eq!(req.topic, "laptops");
        assert!(req.products.is_empty());
        assert_eq!(req.product_details[0].product, "A");
    }

    #[test]
    fn session_response_is_flat() {
        let response = SessionResponse {
            session_id: "abc".to_string(),
            session: DecisionSession {
                topic: "laptops".to_string(),
                ..Default::default()
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["sessionId"], "abc");
        assert_eq!(json["topic"], "laptops");
        assert!(json["productDetails"].is_array());
    }
}
