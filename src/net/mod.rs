//! Remote AI calls.
//!
//! The only network traffic in the app: two blocking calls against the
//! Gemini `generateContent` endpoint, run from worker threads.

pub mod gemini;

pub use gemini::{GeminiClient, GeminiError, Recommendation};
