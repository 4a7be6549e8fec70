//! Gemini client for engine recommendations and trending topics.
//!
//! Both operations follow the same pattern: build a natural-language
//! prompt, pin the output shape with a response schema, parse the JSON
//! the model returns, validate its structure. Any transport, parse, or
//! schema failure folds into a single [`GeminiError`] — no retries, no
//! partial results, no caching.

use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::catalog::Engine;
use crate::i18n::Lang;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL: &str = "gemini-2.5-flash";

/// How many trending topics to ask for. The caller tolerates fewer.
pub const TRENDING_COUNT: usize = 5;

/// One AI-suggested engine with its one-line justification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "engineId")]
    pub engine_id: String,
    pub reason: String,
}

/// Error during a Gemini call.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self, GeminiError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("search-planets/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self { http, api_key })
    }

    /// Build a client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, GeminiError> {
        let key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(GeminiError::MissingApiKey)?;
        Self::new(key)
    }

    /// Ask for 2-3 engines from `engines` matching `query`, with reasons
    /// written in `lang`. Identical queries re-invoke the model every time.
    pub fn suggest_engines(
        &self,
        query: &str,
        engines: &[Engine],
        lang: Lang,
    ) -> Result<Vec<Recommendation>, GeminiError> {
        let prompt = build_recommendation_prompt(query, engines, lang);
        let text = self.generate(&prompt, recommendation_schema())?;
        parse_recommendations(&text)
    }

    /// Ask for up to [`TRENDING_COUNT`] short trending search topics in `lang`.
    pub fn trending_topics(&self, lang: Lang) -> Result<Vec<String>, GeminiError> {
        let prompt = build_trending_prompt(lang);
        let text = self.generate(&prompt, trending_schema())?;
        parse_topics(&text)
    }

    /// One `generateContent` round trip; returns the model's JSON text.
    fn generate(&self, prompt: &str, schema: Value) -> Result<String, GeminiError> {
        let mut endpoint = Url::parse(&format!("{}/{}:generateContent", API_BASE, MODEL))?;
        endpoint
            .query_pairs_mut()
            .append_pair("key", &self.api_key);

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            },
        });

        let response = self
            .http
            .post(endpoint)
            .json(&body)
            .send()?
            .error_for_status()?;

        let envelope: GenerateResponse = response.json()?;
        extract_text(envelope)
    }
}

// ─── Prompts & schemas ───────────────────────────────────────────────────────

/// Instruction embedding the query, the response language, and the catalog.
fn build_recommendation_prompt(query: &str, engines: &[Engine], lang: Lang) -> String {
    let engine_list = engines
        .iter()
        .map(|e| format!("- {} (id: {}): {}", e.name, e.id, e.description.resolve(lang)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "A user wants to perform a search. Analyze their query and recommend the most \
         suitable search engines from the provided list.\n\
         Provide 2 to 3 recommendations. The user's query is in the language \"{lang}\". \
         Your entire response, including the reasons, must be in that same language.\n\n\
         USER QUERY: \"{query}\"\n\n\
         AVAILABLE SEARCH ENGINES:\n{engine_list}\n\n\
         Analyze the query's intent (e.g., technical, shopping, news, regional, \
         privacy-focused) and match it to the strengths of the search engines.\n\
         For example, if the query is in Chinese, recommend Baidu. If it's about \
         privacy, recommend DuckDuckGo. For general queries, Google is a good choice.\n\
         Your response must be a JSON object that strictly adheres to the provided \
         schema. Do not include any markdown.",
        lang = lang.tag(),
        query = query,
        engine_list = engine_list,
    )
}

fn build_trending_prompt(lang: Lang) -> String {
    format!(
        "Provide a list of {count} current and diverse global trending search topics. \
         These should be real, popular topics people are searching for right now.\n\
         The response must be in the language with this code: \"{lang}\".\n\n\
         Your response must be a JSON object that strictly adheres to the provided \
         schema. Do not include any markdown formatting.",
        count = TRENDING_COUNT,
        lang = lang.tag(),
    )
}

fn recommendation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recommendations": {
                "type": "ARRAY",
                "description": "A list of recommended search engines based on the user's query.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "engineId": {
                            "type": "STRING",
                            "description": "The unique ID of the recommended search engine.",
                        },
                        "reason": {
                            "type": "STRING",
                            "description": "A brief explanation of why this search engine is recommended for the given query.",
                        },
                    },
                    "required": ["engineId", "reason"],
                },
            },
        },
        "required": ["recommendations"],
    })
}

fn trending_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "topics": {
                "type": "ARRAY",
                "description": "A list of current global trending search topics.",
                "items": { "type": "STRING" },
            },
        },
        "required": ["topics"],
    })
}

// ─── Response parsing ────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: String,
}

/// Pull the model's JSON text out of the response envelope.
fn extract_text(envelope: GenerateResponse) -> Result<String, GeminiError> {
    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| GeminiError::MalformedResponse("no candidate text".into()))
}

/// Parse and structurally validate a recommendation payload.
fn parse_recommendations(text: &str) -> Result<Vec<Recommendation>, GeminiError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| GeminiError::MalformedResponse(e.to_string()))?;

    // The `recommendations` member must exist and be an array before we
    // accept anything from it.
    if !value
        .get("recommendations")
        .map(Value::is_array)
        .unwrap_or(false)
    {
        return Err(GeminiError::MalformedResponse(
            "`recommendations` is missing or not an array".into(),
        ));
    }

    serde_json::from_value::<Vec<Recommendation>>(value["recommendations"].clone())
        .map_err(|e| GeminiError::MalformedResponse(e.to_string()))
}

/// Parse a trending-topics payload, keeping at most [`TRENDING_COUNT`].
fn parse_topics(text: &str) -> Result<Vec<String>, GeminiError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| GeminiError::MalformedResponse(e.to_string()))?;

    if !value.get("topics").map(Value::is_array).unwrap_or(false) {
        return Err(GeminiError::MalformedResponse(
            "`topics` is missing or not an array".into(),
        ));
    }

    let mut topics: Vec<String> = serde_json::from_value(value["topics"].clone())
        .map_err(|e| GeminiError::MalformedResponse(e.to_string()))?;
    topics.truncate(TRENDING_COUNT);
    Ok(topics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_prompt_embeds_query_catalog_and_language() {
        let prompt = build_recommendation_prompt("rust tutorials", Engine::all(), Lang::Es);
        assert!(prompt.contains("rust tutorials"));
        assert!(prompt.contains("\"es\""));
        for engine in Engine::all() {
            assert!(prompt.contains(&format!("id: {}", engine.id)), "{}", engine.id);
        }
        // Descriptions must be in the requested language
        assert!(prompt.contains("El motor de búsqueda más popular"));
    }

    #[test]
    fn trending_prompt_embeds_count_and_language() {
        let prompt = build_trending_prompt(Lang::En);
        assert!(prompt.contains("list of 5"));
        assert!(prompt.contains("\"en\""));
    }

    #[test]
    fn parse_valid_recommendations() {
        let text = r#"{"recommendations": [
            {"engineId": "google", "reason": "broad coverage"},
            {"engineId": "duckduckgo", "reason": "privacy"}
        ]}"#;
        let recs = parse_recommendations(text).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].engine_id, "google");
        assert_eq!(recs[1].reason, "privacy");
    }

    #[test]
    fn reject_recommendations_not_an_array() {
        let text = r#"{"recommendations": "google"}"#;
        assert!(matches!(
            parse_recommendations(text),
            Err(GeminiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn reject_missing_recommendations_member() {
        assert!(parse_recommendations(r#"{"other": []}"#).is_err());
        assert!(parse_recommendations("[1, 2, 3]").is_err());
        assert!(parse_recommendations("not json at all").is_err());
    }

    #[test]
    fn reject_item_missing_required_field() {
        let text = r#"{"recommendations": [{"engineId": "google"}]}"#;
        assert!(parse_recommendations(text).is_err());
    }

    #[test]
    fn parse_topics_truncates_to_requested_count() {
        let text = r#"{"topics": ["a", "b", "c", "d", "e", "f", "g"]}"#;
        let topics = parse_topics(text).unwrap();
        assert_eq!(topics.len(), TRENDING_COUNT);
        assert_eq!(topics[0], "a");
    }

    #[test]
    fn parse_topics_tolerates_fewer() {
        let topics = parse_topics(r#"{"topics": ["one", "two"]}"#).unwrap();
        assert_eq!(topics, vec!["one", "two"]);
    }

    #[test]
    fn reject_topics_not_an_array() {
        assert!(parse_topics(r#"{"topics": 5}"#).is_err());
    }

    #[test]
    fn extract_candidate_text_from_envelope() {
        let envelope: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "  {\"topics\": []}  "}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(envelope).unwrap(), r#"{"topics": []}"#);
    }

    #[test]
    fn empty_envelope_is_malformed() {
        let envelope: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(
            extract_text(envelope),
            Err(GeminiError::MalformedResponse(_))
        ));
    }
}
