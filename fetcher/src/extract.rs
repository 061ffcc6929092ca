//! Pulling language sections and the detail fragment out of article HTML.

use engine::Language;
use lazy_static::lazy_static;
use scraper::{Html, Selector};

lazy_static! {
    static ref SECTION_EN: Selector = Selector::parse(r#"[data-lang-section="en"]"#).expect("valid selector");
    static ref SECTION_GR: Selector = Selector::parse(r#"[data-lang-section="gr"]"#).expect("valid selector");
    static ref ANY_SECTION: Selector = Selector::parse("[data-lang-section]").expect("valid selector");
    static ref MODAL_BODY: Selector = Selector::parse(".modal-body").expect("valid selector");
}

fn section_selector(lang: Language) -> &'static Selector {
    match lang {
        Language::En => &*SECTION_EN,
        Language::Gr => &*SECTION_GR,
    }
}

/// Plain text of each language section of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionTexts {
    pub primary: String,
    pub secondary: String,
}

impl SectionTexts {
    pub fn text(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.primary,
            Language::Gr => &self.secondary,
        }
    }
}

/// Text of the first element marked for each language, one space between text nodes so
/// adjacent block elements stay separate words. A missing marker yields an empty string.
pub fn section_texts(body: &str) -> SectionTexts {
    let doc = Html::parse_document(body);
    let text_of = |lang| {
        doc.select(section_selector(lang))
            .next()
            .map(|n| n.text().map(str::trim).filter(|t| !t.is_empty()).collect::<Vec<_>>().join(" "))
            .unwrap_or_default()
    };
    SectionTexts { primary: text_of(Language::En), secondary: text_of(Language::Gr) }
}

/// Inner HTML of the first `.modal-body`, or the whole body when there is none.
pub fn detail_fragment(body: &str) -> String {
    let doc = Html::parse_document(body);
    match doc.select(&MODAL_BODY).next() {
        Some(node) => node.inner_html(),
        None => body.to_string(),
    }
}

/// Keep only the sections for `lang`. Fragments without language sections pass through.
pub fn localize(fragment: &str, lang: Language) -> String {
    let doc = Html::parse_fragment(fragment);
    if doc.select(&ANY_SECTION).next().is_none() {
        return fragment.to_string();
    }
    doc.select(section_selector(lang))
        .map(|n| n.html())
        .collect::<Vec<_>>()
        .join("\n")
}
