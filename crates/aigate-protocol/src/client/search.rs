use serde::{Deserialize, Serialize};

/// Body of `POST /api/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// Success envelope for `POST /api/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    #[serde(rename = "synthesizedResponse")]
    pub synthesized_response: String,
    pub sources: Vec<SearchSource>,
    #[serde(rename = "relatedQuestions")]
    pub related_questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSource {
    pub title: String,
    pub url: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_uses_client_casing() {
        let resp = SearchResponse {
            query: "rust".to_string(),
            synthesized_response: "answer".to_string(),
            sources: vec![],
            related_questions: vec!["How does rust work?".to_string()],
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("synthesizedResponse").is_some());
        assert!(json.get("relatedQuestions").is_some());
    }
}
