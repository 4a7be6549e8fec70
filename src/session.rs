//! Session state machine.
//!
//! Owns the query text, loading flags, last error, recommendation set,
//! and trending topics for one page session. Pure state transitions:
//! network calls are issued by the caller from the [`QueryRequest`]
//! descriptors this module hands out, and their results come back in via
//! the `apply_*` methods. Overlapping queries are disambiguated by a
//! sequence number — only the newest submitted query's response is
//! applied, stale ones are discarded.

use std::collections::HashSet;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::catalog::Engine;
use crate::i18n::{tr, Lang, UiText};
use crate::net::{GeminiError, Recommendation};

/// Percent-encoding set matching JavaScript's `encodeURIComponent`:
/// alphanumerics and `-_.!~*'()` pass through, everything else escapes.
const QUERY_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A recommendation fetch the caller should start. Responses must quote
/// `seq` back so stale ones can be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub seq: u64,
    pub query: String,
}

pub struct Session {
    lang: Lang,
    known_ids: HashSet<&'static str>,
    seq: u64,
    pub query: String,
    pub loading: bool,
    pub topics_loading: bool,
    pub error: Option<&'static str>,
    pub recommendations: Vec<Recommendation>,
    pub trending: Vec<String>,
}

impl Session {
    /// `topics_loading` starts true: the app fires the trending fetch
    /// once on mount.
    pub fn new(lang: Lang, engines: &[Engine]) -> Self {
        Self {
            lang,
            known_ids: engines.iter().map(|e| e.id).collect(),
            seq: 0,
            query: String::new(),
            loading: false,
            topics_loading: true,
            error: None,
            recommendations: Vec::new(),
            trending: Vec::new(),
        }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Submit a query. Blank text clears the recommendation set and
    /// issues no request; otherwise the session enters the loading state
    /// and the caller gets a sequence-numbered fetch to run.
    pub fn submit_query(&mut self, text: &str) -> Option<QueryRequest> {
        if text.trim().is_empty() {
            self.recommendations.clear();
            return None;
        }
        self.query = text.to_string();
        self.loading = true;
        self.error = None;
        self.seq += 1;
        Some(QueryRequest {
            seq: self.seq,
            query: text.to_string(),
        })
    }

    /// A topic pill click is just a query submission for that topic.
    pub fn click_topic(&mut self, topic: &str) -> Option<QueryRequest> {
        self.submit_query(topic)
    }

    /// Apply a recommendation result. Responses for anything but the
    /// newest submitted query are discarded; recommendations naming
    /// unknown engine ids are dropped, not errored.
    pub fn apply_recommendations(
        &mut self,
        seq: u64,
        result: Result<Vec<Recommendation>, GeminiError>,
    ) {
        if seq != self.seq {
            log::debug!("discarding stale recommendation response (seq {seq}, newest {})", self.seq);
            return;
        }
        self.loading = false;
        match result {
            Ok(recs) => {
                let (known, unknown): (Vec<_>, Vec<_>) = recs
                    .into_iter()
                    .partition(|r| self.known_ids.contains(r.engine_id.as_str()));
                for rec in &unknown {
                    log::warn!("dropping recommendation for unknown engine {:?}", rec.engine_id);
                }
                self.recommendations = known;
                self.error = None;
            }
            Err(e) => {
                log::error!("recommendation fetch failed: {e}");
                self.recommendations.clear();
                self.error = Some(tr(self.lang, UiText::Error));
            }
        }
    }

    /// Apply the mount-time trending result. Failure recovery is an
    /// empty topic list; never a user-visible error.
    pub fn apply_topics(&mut self, result: Result<Vec<String>, GeminiError>) {
        self.topics_loading = false;
        match result {
            Ok(topics) => self.trending = topics,
            Err(e) => {
                log::warn!("trending fetch failed: {e}");
                self.trending.clear();
            }
        }
    }

    /// Whether `id` is in the highlight set, i.e. named by the current
    /// recommendations.
    pub fn is_highlighted(&self, id: &str) -> bool {
        self.recommendations.iter().any(|r| r.engine_id == id)
    }

    /// The URL a planet click should open: the engine's search template
    /// with the encoded query substituted when a query is active and at
    /// least one recommendation stands, else the engine's home page.
    pub fn click_url(&self, engine: &Engine) -> String {
        if !self.query.trim().is_empty() && !self.recommendations.is_empty() {
            let encoded = utf8_percent_encode(&self.query, QUERY_ENCODE).to_string();
            engine.search_url.replace("%s", &encoded)
        } else {
            engine.home_url.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Lang::En, Engine::all())
    }

    fn rec(id: &str, reason: &str) -> Recommendation {
        Recommendation {
            engine_id: id.to_string(),
            reason: reason.to_string(),
        }
    }

    #[test]
    fn blank_query_clears_recommendations_without_a_request() {
        let mut s = session();
        let req = s.submit_query("rust").unwrap();
        s.apply_recommendations(req.seq, Ok(vec![rec("google", "broad")]));
        assert_eq!(s.recommendations.len(), 1);

        assert!(s.submit_query("").is_none());
        assert!(s.recommendations.is_empty());
        assert!(s.submit_query("   ").is_none());
        assert!(!s.loading);
    }

    #[test]
    fn successful_result_sets_highlights_and_drops_unknown_ids() {
        let mut s = session();
        let req = s.submit_query("privacy").unwrap();
        assert!(s.loading);

        s.apply_recommendations(
            req.seq,
            Ok(vec![
                rec("google", "broad coverage"),
                rec("altavista", "does not exist"),
            ]),
        );
        assert!(!s.loading);
        assert_eq!(s.recommendations.len(), 1);
        assert!(s.is_highlighted("google"));
        assert!(!s.is_highlighted("altavista"));
        assert!(!s.is_highlighted("bing"));
    }

    #[test]
    fn failure_sets_localized_error_and_clears_recommendations() {
        let mut s = session();
        let req = s.submit_query("anything").unwrap();
        s.apply_recommendations(
            req.seq,
            Err(GeminiError::MalformedResponse("bad shape".into())),
        );
        assert!(!s.loading);
        assert!(s.recommendations.is_empty());
        let msg = s.error.expect("error message set");
        assert!(!msg.is_empty());
        assert_eq!(msg, tr(Lang::En, UiText::Error));
    }

    #[test]
    fn stale_response_is_discarded_newest_wins() {
        let mut s = session();
        let first = s.submit_query("query a").unwrap();
        let second = s.submit_query("query b").unwrap();

        // Second response lands first, then the stale first one.
        s.apply_recommendations(second.seq, Ok(vec![rec("bing", "for b")]));
        s.apply_recommendations(first.seq, Ok(vec![rec("yahoo", "for a")]));

        assert!(s.is_highlighted("bing"));
        assert!(!s.is_highlighted("yahoo"));
        assert!(!s.loading);
    }

    #[test]
    fn stale_failure_does_not_clobber_newest_result() {
        let mut s = session();
        let first = s.submit_query("query a").unwrap();
        let second = s.submit_query("query b").unwrap();
        s.apply_recommendations(second.seq, Ok(vec![rec("google", "fine")]));
        s.apply_recommendations(first.seq, Err(GeminiError::MalformedResponse("late".into())));
        assert!(s.error.is_none());
        assert!(s.is_highlighted("google"));
    }

    #[test]
    fn topic_click_enters_the_query_flow() {
        let mut s = session();
        let req = s.click_topic("world cup").unwrap();
        assert_eq!(req.query, "world cup");
        assert_eq!(s.query, "world cup");
        assert!(s.loading);
    }

    #[test]
    fn trending_failure_recovers_to_an_empty_list() {
        let mut s = session();
        assert!(s.topics_loading);
        s.apply_topics(Err(GeminiError::MalformedResponse("oops".into())));
        assert!(!s.topics_loading);
        assert!(s.trending.is_empty());
        assert!(s.error.is_none());

        s.topics_loading = true;
        s.apply_topics(Ok(vec!["eclipse".into(), "elections".into()]));
        assert_eq!(s.trending.len(), 2);
    }

    #[test]
    fn click_opens_search_url_with_percent_encoded_query() {
        let mut s = session();
        let req = s.submit_query("c++ tutorial").unwrap();
        s.apply_recommendations(req.seq, Ok(vec![rec("google", "fits")]));

        let google = Engine::by_id("google").unwrap();
        assert_eq!(
            s.click_url(google),
            "https://www.google.com/search?q=c%2B%2B%20tutorial"
        );
    }

    #[test]
    fn click_opens_home_url_without_query_or_recommendations() {
        let mut s = session();
        let google = Engine::by_id("google").unwrap();
        assert_eq!(s.click_url(google), "https://www.google.com");

        // Query active but no recommendation survived: still the home page.
        let req = s.submit_query("obscure").unwrap();
        s.apply_recommendations(req.seq, Ok(vec![]));
        assert_eq!(s.click_url(google), "https://www.google.com");
    }
}
