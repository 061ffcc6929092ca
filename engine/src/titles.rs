use crate::corpus::BilingualTitle;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ORDER_PREFIX: Regex = Regex::new(r"^\d+_").expect("valid regex");
    static ref BILINGUAL: Regex = Regex::new(r"(.+?)_\((.+?)\)").expect("valid regex");
}

/// Derive the display titles of an article from its file name.
///
/// `2_Privacy_Guide_(Οδηγός_Ιδιωτικότητας).html` gives `Privacy Guide` / `Οδηγός Ιδιωτικότητας`;
/// a name without the `<primary>_(<secondary>)` pattern uses the same title for both languages.
pub fn derive_titles(file_name: &str, extension: &str) -> BilingualTitle {
    let stem = file_name.strip_suffix(extension).unwrap_or(file_name);
    let stem = ORDER_PREFIX.replace(stem, "");
    let primary = stem.replace('_', " ");

    match BILINGUAL.captures(&stem) {
        Some(caps) => BilingualTitle {
            primary: caps[1].replace('_', " ").trim().to_string(),
            secondary: caps[2].replace('_', " ").trim().to_string(),
        },
        None => BilingualTitle { secondary: primary.clone(), primary },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bilingual_name() {
        let t = derive_titles("2_Privacy_Guide_(Οδηγός_Ιδιωτικότητας).html", ".html");
        assert_eq!(t.primary, "Privacy Guide");
        assert_eq!(t.secondary, "Οδηγός Ιδιωτικότητας");
    }

    #[test]
    fn plain_name() {
        let t = derive_titles("Intro.html", ".html");
        assert_eq!(t.primary, "Intro");
        assert_eq!(t.secondary, "Intro");
    }

    #[test]
    fn ordering_prefix_only_stripped_at_start() {
        let t = derive_titles("10_Top_10_Tools.html", ".html");
        assert_eq!(t.primary, "Top 10 Tools");
        assert_eq!(t.secondary, "Top 10 Tools");
    }
}
