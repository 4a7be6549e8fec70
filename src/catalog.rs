//! The static search-engine catalog.
//!
//! Every engine the app knows about is described here, at process start,
//! as an immutable [`Engine`] record. Display strings that differ by
//! language are stored as a [`LocalizedText`] and resolved exactly once
//! per session through [`LocalizedText::resolve`] — use sites never
//! branch on the shape themselves.

use crate::i18n::Lang;

/// A display string that is either language-independent or a per-language
/// table with a mandatory English entry.
#[derive(Debug, Clone, Copy)]
pub enum LocalizedText {
    Plain(&'static str),
    Localized(&'static [(Lang, &'static str)]),
}

impl LocalizedText {
    /// Resolve to a concrete string for `lang`, falling back to English
    /// for any missing entry. Never empty for a well-formed catalog.
    pub fn resolve(&self, lang: Lang) -> &'static str {
        match self {
            LocalizedText::Plain(s) => s,
            LocalizedText::Localized(table) => table
                .iter()
                .find(|(l, _)| *l == lang)
                .or_else(|| table.iter().find(|(l, _)| *l == Lang::En))
                .map(|(_, s)| *s)
                .unwrap_or(""),
        }
    }
}

/// One search engine, immutable for the life of the process.
#[derive(Debug, Clone, Copy)]
pub struct Engine {
    /// Stable unique key, referenced by AI recommendations.
    pub id: &'static str,
    pub name: &'static str,
    /// Relative weight; drives layout radius and initial sort order.
    pub popularity: f32,
    /// Planet fill color (RGB).
    pub color: [u8; 3],
    pub home_url: &'static str,
    /// Search URL template with `%s` standing in for the encoded query.
    pub search_url: &'static str,
    /// One-glyph monogram painted on the planet.
    pub icon: &'static str,
    pub description: LocalizedText,
    pub monthly_searches: LocalizedText,
}

impl Engine {
    /// The full catalog, most popular first is not guaranteed here —
    /// the layout engine sorts for itself.
    pub fn all() -> &'static [Engine] {
        CATALOG
    }

    pub fn by_id(id: &str) -> Option<&'static Engine> {
        CATALOG.iter().find(|e| e.id == id)
    }
}

static CATALOG: &[Engine] = &[
    Engine {
        id: "google",
        name: "Google",
        popularity: 100.0,
        color: [59, 130, 246],
        home_url: "https://www.google.com",
        search_url: "https://www.google.com/search?q=%s",
        icon: "G",
        description: LocalizedText::Localized(&[
            (Lang::En, "The most popular search engine worldwide, offering comprehensive and fast results for general queries, technical questions, and product searches."),
            (Lang::Es, "El motor de búsqueda más popular del mundo, que ofrece resultados completos y rápidos para consultas generales, preguntas técnicas y búsquedas de productos."),
        ]),
        monthly_searches: LocalizedText::Localized(&[
            (Lang::En, "Approx. 90B+"),
            (Lang::Es, "Aprox. 90B+"),
        ]),
    },
    Engine {
        id: "bing",
        name: "Bing",
        popularity: 35.0,
        color: [34, 211, 238],
        home_url: "https://www.bing.com",
        search_url: "https://www.bing.com/search?q=%s",
        icon: "b",
        description: LocalizedText::Localized(&[
            (Lang::En, "Microsoft's search engine, known for its strong image and video search capabilities and integration with Microsoft products."),
            (Lang::Es, "El motor de búsqueda de Microsoft, conocido por sus potentes capacidades de búsqueda de imágenes y videos y su integración con los productos de Microsoft."),
        ]),
        monthly_searches: LocalizedText::Localized(&[
            (Lang::En, "Approx. 6B+"),
            (Lang::Es, "Aprox. 6B+"),
        ]),
    },
    Engine {
        id: "yahoo",
        name: "Yahoo",
        popularity: 20.0,
        color: [168, 85, 247],
        home_url: "https://search.yahoo.com",
        search_url: "https://search.yahoo.com/search?p=%s",
        icon: "Y!",
        description: LocalizedText::Localized(&[
            (Lang::En, "A long-standing search engine and web portal, providing news, finance, and media content alongside its search results."),
            (Lang::Es, "Un portal web y motor de búsqueda de larga trayectoria, que proporciona noticias, finanzas y contenido multimedia junto con sus resultados de búsqueda."),
        ]),
        monthly_searches: LocalizedText::Localized(&[
            (Lang::En, "Approx. 3.5B+"),
            (Lang::Es, "Aprox. 3.5B+"),
        ]),
    },
    Engine {
        id: "baidu",
        name: "Baidu",
        popularity: 60.0,
        color: [37, 99, 235],
        home_url: "https://www.baidu.com",
        search_url: "https://www.baidu.com/s?wd=%s",
        icon: "百",
        description: LocalizedText::Localized(&[
            (Lang::En, "The dominant search engine in China, specializing in Chinese language content and services."),
            (Lang::Es, "El motor de búsqueda dominante en China, especializado en contenido y servicios en idioma chino."),
        ]),
        monthly_searches: LocalizedText::Localized(&[
            (Lang::En, "Approx. 5B+"),
            (Lang::Es, "Aprox. 5B+"),
        ]),
    },
    Engine {
        id: "yandex",
        name: "Yandex",
        popularity: 25.0,
        color: [220, 38, 38],
        home_url: "https://yandex.com",
        search_url: "https://yandex.com/search/?text=%s",
        icon: "Я",
        description: LocalizedText::Localized(&[
            (Lang::En, "The leading search engine in Russia, offering a wide range of services including maps, translation, and cloud storage, with a focus on Cyrillic languages."),
            (Lang::Es, "El motor de búsqueda líder en Rusia, que ofrece una amplia gama de servicios que incluyen mapas, traducción y almacenamiento en la nube, con un enfoque en los idiomas cirílicos."),
        ]),
        monthly_searches: LocalizedText::Localized(&[
            (Lang::En, "Approx. 3B+"),
            (Lang::Es, "Aprox. 3B+"),
        ]),
    },
    Engine {
        id: "duckduckgo",
        name: "DuckDuckGo",
        popularity: 30.0,
        color: [234, 88, 12],
        home_url: "https://duckduckgo.com",
        search_url: "https://duckduckgo.com/?q=%s",
        icon: "D",
        description: LocalizedText::Localized(&[
            (Lang::En, "A privacy-focused search engine that does not track its users, providing unbiased results from various sources."),
            (Lang::Es, "Un motor de búsqueda centrado en la privacidad que no rastrea a sus usuarios, proporcionando resultados imparciales de diversas fuentes."),
        ]),
        monthly_searches: LocalizedText::Localized(&[
            (Lang::En, "Approx. 2.5B+"),
            (Lang::Es, "Aprox. 2.5B+"),
        ]),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_unique() {
        let mut seen = HashSet::new();
        for engine in Engine::all() {
            assert!(seen.insert(engine.id), "duplicate id {}", engine.id);
        }
    }

    #[test]
    fn urls_well_formed() {
        for engine in Engine::all() {
            assert!(url::Url::parse(engine.home_url).is_ok(), "{}", engine.id);
            assert!(
                engine.search_url.contains("%s"),
                "{} search template lacks %s placeholder",
                engine.id
            );
        }
    }

    #[test]
    fn popularity_positive() {
        for engine in Engine::all() {
            assert!(engine.popularity > 0.0, "{}", engine.id);
        }
    }

    #[test]
    fn localized_fields_resolve_for_every_language() {
        for engine in Engine::all() {
            for lang in [Lang::En, Lang::Es] {
                assert!(!engine.description.resolve(lang).is_empty(), "{}", engine.id);
                assert!(
                    !engine.monthly_searches.resolve(lang).is_empty(),
                    "{}",
                    engine.id
                );
            }
        }
    }

    #[test]
    fn by_id_round_trip() {
        assert_eq!(Engine::by_id("google").map(|e| e.name), Some("Google"));
        assert!(Engine::by_id("altavista").is_none());
    }

    #[test]
    fn plain_text_resolves_as_is() {
        let t = LocalizedText::Plain("same everywhere");
        assert_eq!(t.resolve(Lang::En), "same everywhere");
        assert_eq!(t.resolve(Lang::Es), "same everywhere");
    }
}
