//! Title comparison
//!
//! One matching policy for every fuzzy title rule: normalized equality,
//! then containment (shorter side at least [`MIN_CONTAINED_LEN`] chars),
//! then Levenshtein distance on the normalized forms.

/// Punctuation removed by [`normalize_title`]
const STRIPPED: [char; 11] = [':', ',', '.', '\'', '"', '!', '?', '(', ')', '[', ']'];

/// Shortest normalized title accepted as a substring match
pub const MIN_CONTAINED_LEN: usize = 3;

/// Lowercase, drop punctuation, collapse whitespace
pub fn normalize_title(title: &str) -> String {
    let stripped: String = title
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED.contains(c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Edit distance with unit costs
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleMatch {
    /// Equal after normalization
    Exact,
    /// One normalized title contains the other
    Contained,
    /// Levenshtein distance between normalized titles
    Distance(usize),
}

impl TitleMatch {
    /// Exact, contained, or within `max` edits
    pub fn within(self, max: usize) -> bool {
        match self {
            TitleMatch::Exact | TitleMatch::Contained => true,
            TitleMatch::Distance(d) => d <= max,
        }
    }
}

pub fn compare_titles(a: &str, b: &str) -> TitleMatch {
    let na = normalize_title(a);
    let nb = normalize_title(b);
    if na == nb {
        return TitleMatch::Exact;
    }

    let (shorter, longer) = if na.len() <= nb.len() { (&na, &nb) } else { (&nb, &na) };
    if shorter.chars().count() >= MIN_CONTAINED_LEN && longer.contains(shorter.as_str()) {
        return TitleMatch::Contained;
    }

    TitleMatch::Distance(levenshtein(&na, &nb))
}

/// Case-insensitive whole-word containment
///
/// A match counts only when the characters on either side are not
/// alphanumeric, so "Bach" is not found in "Bacharach".
pub fn contains_word(text: &str, word: &str) -> bool {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        return false;
    }
    let text = text.to_lowercase();

    text.match_indices(word.as_str()).any(|(start, matched)| {
        let before = text[..start].chars().next_back();
        let after = text[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterCase {
    Upper,
    Lower,
}

/// Letters below this count are too short to judge capitalization
pub const MIN_CASED_LETTERS: usize = 4;

/// Uniform letter case of `s`, ignoring digits and punctuation
///
/// `None` for mixed case, uncased scripts, or fewer than
/// [`MIN_CASED_LETTERS`] letters.
pub fn letter_case(s: &str) -> Option<LetterCase> {
    let letters: Vec<char> = s.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() < MIN_CASED_LETTERS {
        return None;
    }
    if letters.iter().all(|c| c.is_uppercase()) {
        Some(LetterCase::Upper)
    } else if letters.iter().all(|c| c.is_lowercase()) {
        Some(LetterCase::Lower)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("Symphony No. 5, Op. 67"), "symphony no 5 op 67");
        assert_eq!(normalize_title("  \"Eroica\"  (Live!) "), "eroica live");
        assert_eq!(normalize_title("Ich habe genug [BWV 82]"), "ich habe genug bwv 82");
        assert_eq!(normalize_title(""), "");
    }

    #[test]
    fn test_compare_titles() {
        assert_eq!(compare_titles("Symphony No. 5", "symphony no 5"), TitleMatch::Exact);
        assert_eq!(
            compare_titles("Symphony No. 5", "Symphony No. 5, Op. 67"),
            TitleMatch::Contained
        );
        assert_eq!(compare_titles("Adagio", "Adagoi"), TitleMatch::Distance(2));
        assert!(compare_titles("Adagio", "Adagoi").within(3));
        assert!(!compare_titles("Adagio", "Rondo alla turca").within(3));
    }

    #[test]
    fn test_short_titles_are_not_substring_matched() {
        assert_eq!(compare_titles("I", "Intermezzo"), TitleMatch::Distance(9));
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("Beethoven: Symphony No. 5", "beethoven"));
        assert!(contains_word("Sonata (after Handel)", "Handel"));
        assert!(!contains_word("Bacharach", "Bach"));
        assert!(!contains_word("anything", ""));
        assert!(contains_word("Bach", "BACH"));
    }

    #[test]
    fn test_letter_case() {
        assert_eq!(letter_case("BEETHOVEN: SYMPHONY NO. 5"), Some(LetterCase::Upper));
        assert_eq!(letter_case("symphony no. 5"), Some(LetterCase::Lower));
        assert_eq!(letter_case("Symphony No. 5"), None);
        assert_eq!(letter_case("LSO"), None);
        assert_eq!(letter_case("交响曲第五号"), None);
    }
}
