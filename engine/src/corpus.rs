use crate::titles::derive_titles;
use crate::tokenizer::tokenize;
use crate::Error;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;

/// Display languages. `En` is the primary language of the corpus, `Gr` the secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Gr,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Gr];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Gr => "gr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "gr" => Ok(Language::Gr),
            other => Err(Error::UnknownLanguage(other.to_string())),
        }
    }
}

/// Display titles of one document, one per language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualTitle {
    pub primary: String,
    pub secondary: String,
}

impl BilingualTitle {
    pub fn for_language(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.primary,
            Language::Gr => &self.secondary,
        }
    }
}

/// One remote article file as returned by the directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    /// Lowercase hex SHA-1 of `download_url`.
    pub id: String,
    /// File name including extension.
    pub name: String,
    pub download_url: String,
    pub titles: BilingualTitle,
}

impl DocumentDescriptor {
    /// Titles are derived once here from the file name; see [`derive_titles`].
    pub fn new(name: impl Into<String>, download_url: impl Into<String>, extension: &str) -> Self {
        let name = name.into();
        let download_url = download_url.into();
        let titles = derive_titles(&name, extension);
        Self { id: document_id(&download_url), name, download_url, titles }
    }

    pub fn title(&self, lang: Language) -> &str {
        self.titles.for_language(lang)
    }
}

pub fn document_id(download_url: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(download_url.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// A single language rendition of one document with its tokens precomputed.
///
/// Token sequences are derived from `title`/`text` at construction and the fields are
/// private so they cannot drift apart afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusItem {
    doc_id: String,
    title: String,
    text: String,
    title_tokens: Vec<String>,
    text_tokens: Vec<String>,
    url: String,
    language: Language,
}

impl CorpusItem {
    pub fn doc_id(&self) -> &str { &self.doc_id }
    pub fn title(&self) -> &str { &self.title }
    pub fn text(&self) -> &str { &self.text }
    pub fn title_tokens(&self) -> &[String] { &self.title_tokens }
    pub fn text_tokens(&self) -> &[String] { &self.text_tokens }
    pub fn url(&self) -> &str { &self.url }
    pub fn language(&self) -> Language { self.language }
}

/// Build a [`CorpusItem`], tokenizing title and text.
pub fn preprocess(title: &str, text: &str, url: &str, language: Language) -> CorpusItem {
    CorpusItem {
        doc_id: document_id(url),
        title: title.to_string(),
        text: text.to_string(),
        title_tokens: tokenize(title),
        text_tokens: tokenize(text),
        url: url.to_string(),
        language,
    }
}
