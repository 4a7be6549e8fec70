//! UI string localization.
//!
//! A fixed table of UI strings per supported language, looked up through
//! [`tr`]. Unrecognized language tags fall back to English silently —
//! never an error, never an empty string.

/// Supported UI language, resolved once at startup and threaded into
/// every component that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    En,
    Es,
}

impl Lang {
    pub const DEFAULT: Lang = Lang::En;

    /// Map a language tag ("es", "es-MX", "es_ES.UTF-8") to a supported
    /// language. Anything unrecognized falls back to English.
    pub fn from_tag(tag: &str) -> Lang {
        let primary = tag
            .split(|c| c == '-' || c == '_' || c == '.')
            .next()
            .unwrap_or("");
        match primary.to_ascii_lowercase().as_str() {
            "es" => Lang::Es,
            _ => Lang::DEFAULT,
        }
    }

    /// Resolve the UI language from the `LANG` environment variable.
    pub fn detect() -> Lang {
        std::env::var("LANG")
            .map(|v| Lang::from_tag(&v))
            .unwrap_or(Lang::DEFAULT)
    }

    /// Two-letter tag, embedded into AI prompts.
    pub fn tag(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Es => "es",
        }
    }
}

/// The fixed set of UI strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiText {
    Title,
    Subtitle,
    SearchPlaceholder,
    Thinking,
    RecommendationsFor,
    Trending,
    Error,
    MonthlySearches,
}

/// Look up a UI string for `lang`.
pub fn tr(lang: Lang, key: UiText) -> &'static str {
    match lang {
        Lang::En => match key {
            UiText::Title => "Search Engine Recommender",
            UiText::Subtitle => {
                "Describe what you're looking for, and Gemini will suggest the best search engines for the job."
            }
            UiText::SearchPlaceholder => "Type your search and press Enter...",
            UiText::Thinking => "Gemini is thinking...",
            UiText::RecommendationsFor => "Recommendations for",
            UiText::Trending => "Trending on Google",
            UiText::Error => {
                "Sorry, something went wrong while getting recommendations. Please try again."
            }
            UiText::MonthlySearches => "Monthly Searches",
        },
        Lang::Es => match key {
            UiText::Title => "Recomendador de Motores de Búsqueda",
            UiText::Subtitle => {
                "Describe lo que buscas y Gemini te sugerirá los mejores motores de búsqueda para la tarea."
            }
            UiText::SearchPlaceholder => "Escribe tu búsqueda y presiona Enter...",
            UiText::Thinking => "Gemini está pensando...",
            UiText::RecommendationsFor => "Recomendaciones para",
            UiText::Trending => "Tendencias en Google",
            UiText::Error => {
                "Lo sentimos, algo salió mal al obtener las recomendaciones. Por favor, inténtalo de nuevo."
            }
            UiText::MonthlySearches => "Búsquedas Mensuales",
        },
    }
}
