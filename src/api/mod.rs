//! Wire types for the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

use crate::core::message::Turn;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub text: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl From<&Turn> for Content {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role.as_str().to_string(),
            parts: vec![Part {
                text: turn.text.clone(),
            }],
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: SystemInstruction,
}

impl GenerateContentRequest {
    pub fn new(history: &[Turn], system_prompt: &str) -> Self {
        Self {
            contents: history.iter().map(Content::from).collect(),
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: system_prompt.to_string(),
                }],
            },
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct CandidateContent {
    /// `null` and absent are both treated as "no parts".
    #[serde(default)]
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .as_deref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_deref()?
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }
}

pub fn generate_content_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_carries_history_and_system_instruction() {
        let history = vec![Turn::model("Hello!"), Turn::user("Tell me a joke")];
        let request = GenerateContentRequest::new(&history, "Be brief.");

        assert_eq!(
            serde_json::to_value(&request).expect("serialize"),
            json!({
                "contents": [
                    {"role": "model", "parts": [{"text": "Hello!"}]},
                    {"role": "user", "parts": [{"text": "Tell me a joke"}]}
                ],
                "systemInstruction": {"parts": [{"text": "Be brief."}]}
            })
        );
    }

    #[test]
    fn first_text_walks_nested_fields() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "Why did..."}, {"text": "ignored"}]}},
                {"content": {"parts": [{"text": "second candidate"}]}}
            ]
        }))
        .expect("deserialize");
        assert_eq!(response.first_text(), Some("Why did..."));
    }

    #[test]
    fn first_text_is_none_when_any_level_is_missing() {
        for body in [
            json!({}),
            json!({"candidates": []}),
            json!({"candidates": null}),
            json!({"candidates": [{"content": null}]}),
            json!({"candidates": [{"content": {"parts": null}}]}),
            json!({"candidates": [{"content": {"parts": [{"text": null}]}}]}),
            json!({"candidates": [{}]}),
            json!({"candidates": [{"content": {"parts": []}}]}),
            json!({"candidates": [{"content": {"parts": [{}]}}]}),
            json!({"candidates": [{"content": {"parts": [{"text": ""}]}}]}),
        ] {
            let response: GenerateContentResponse =
                serde_json::from_value(body.clone()).expect("deserialize");
            assert_eq!(response.first_text(), None, "{body}");
        }
    }

    #[test]
    fn url_includes_model_action() {
        assert_eq!(
            generate_content_url("https://example.test/v1beta/", "gemini-x"),
            "https://example.test/v1beta/models/gemini-x:generateContent"
        );
    }
}
