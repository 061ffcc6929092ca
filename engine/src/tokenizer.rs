use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // . , / # ! $ % ^ & * ; : { } = - _ ` ~ ( )
    static ref PUNCT: Regex = Regex::new(r"[.,/#!$%^&*;:{}=\-_`~()]").expect("valid regex");
}

/// Tokenize text into lowercase words: punctuation is stripped (not replaced by a
/// separator), the remainder is split on runs of whitespace and empty pieces are dropped.
/// Left-to-right order is preserved and duplicates are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let stripped = PUNCT.replace_all(&lowered, "");
    stripped.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        assert_eq!(tokenize("Hello, World!"), vec!["hello", "world"]);
    }

    #[test]
    fn punctuation_is_removed_not_split() {
        assert_eq!(tokenize("e-mail snake_case (v1.2)"), vec!["email", "snakecase", "v12"]);
    }

    #[test]
    fn keeps_characters_outside_the_strip_set() {
        assert_eq!(tokenize("what? \"quoted\" it's"), vec!["what?", "\"quoted\"", "it's"]);
    }
}
