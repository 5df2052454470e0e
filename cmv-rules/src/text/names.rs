//! Person-name handling
//!
//! Names come either in natural order ("Ludwig van Beethoven") or reversed
//! ("Bach, Johann Sebastian"). The last name keeps any lowercase particles
//! directly preceding it; the base surname drops them.

use super::titles::contains_word;

/// Lowercase nobiliary particles recognized before a surname
pub const PARTICLES: [&str; 9] = ["van", "von", "de", "da", "della", "la", "le", "du", "del"];

fn is_particle(token: &str) -> bool {
    PARTICLES.contains(&token)
}

/// Split into (given-name tokens, surname tokens including particles)
fn split_name(name: &str) -> (Vec<&str>, Vec<&str>) {
    let name = name.trim();
    if let Some((surname, given)) = name.split_once(',') {
        return (
            given.split_whitespace().collect(),
            surname.split_whitespace().collect(),
        );
    }

    let tokens: Vec<&str> = name.split_whitespace().collect();
    if tokens.is_empty() {
        return (Vec::new(), Vec::new());
    }

    // Walk back from the final token over the particle run
    let mut start = tokens.len() - 1;
    while start > 0 && is_particle(tokens[start - 1]) {
        start -= 1;
    }
    (tokens[..start].to_vec(), tokens[start..].to_vec())
}

/// Last name including particles ("van Beethoven")
pub fn last_name(name: &str) -> String {
    split_name(name).1.join(" ")
}

/// Last name without particles ("Beethoven")
pub fn base_surname(name: &str) -> String {
    let (_, surname) = split_name(name);
    let mut rest: Vec<&str> = surname.iter().copied().skip_while(|t| is_particle(t)).collect();
    if rest.is_empty() {
        rest = surname;
    }
    rest.join(" ")
}

/// Given-name tokens ("Johann", "Sebastian")
pub fn given_names(name: &str) -> Vec<String> {
    split_name(name).0.into_iter().map(str::to_string).collect()
}

/// Name in natural order, whatever form it was written in
pub fn natural_order(name: &str) -> String {
    let (given, surname) = split_name(name);
    given
        .into_iter()
        .chain(surname)
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_letter(part: &str) -> Option<String> {
    part.chars()
        .find(|c| c.is_alphabetic())
        .map(|c| format!("{}.", c.to_uppercase()))
}

/// Initials contributed by one given-name token
///
/// "Jean-Philippe" -> ["J.-P."]; an already dotted "J.S." -> ["J.", "S."].
fn initials(token: &str) -> Vec<String> {
    if token.contains('-') {
        let joined = token
            .split('-')
            .filter_map(first_letter)
            .collect::<Vec<_>>()
            .join("-");
        return if joined.is_empty() { Vec::new() } else { vec![joined] };
    }
    token.split('.').filter_map(first_letter).collect()
}

/// Abbreviated forms accepted in place of the full name
///
/// Built from every given name: compact ("J.S. Bach"), spaced ("J. S. Bach")
/// and unspaced ("J.S.Bach"), each with the full and the base surname.
pub fn abbreviations(name: &str) -> Vec<String> {
    let given = given_names(name);
    if given.is_empty() {
        return Vec::new();
    }

    let letters: Vec<String> = given.iter().flat_map(|g| initials(g)).collect();
    if letters.is_empty() {
        return Vec::new();
    }
    let compact = letters.concat();
    let spaced = letters.join(" ");

    let mut surnames = vec![last_name(name)];
    let base = base_surname(name);
    if !surnames.contains(&base) {
        surnames.push(base);
    }

    let mut forms = Vec::new();
    for surname in &surnames {
        for form in [
            format!("{} {}", compact, surname),
            format!("{} {}", spaced, surname),
            format!("{}{}", compact, surname),
        ] {
            if !forms.contains(&form) {
                forms.push(form);
            }
        }
    }
    forms
}

/// Whether `text` contains an abbreviated form of `full_name`
pub fn has_acceptable_abbreviation(text: &str, full_name: &str) -> bool {
    let haystack = fold(text);
    abbreviations(full_name)
        .iter()
        .any(|form| haystack.contains(&fold(form)))
}

/// Whether `text` contains the full name, in natural or written order
pub fn mentions_full_name(text: &str, full_name: &str) -> bool {
    let haystack = fold(text);
    let written = fold(full_name.trim());
    let natural = fold(&natural_order(full_name));
    (!written.is_empty() && haystack.contains(&written))
        || (!natural.is_empty() && haystack.contains(&natural))
}

/// Whether `text` mentions the base surname as a whole word
pub fn mentions_surname(text: &str, full_name: &str) -> bool {
    let surname = base_surname(full_name);
    !surname.is_empty() && contains_word(&fold(text), &fold(&surname))
}

/// Lax identity of two artist names
///
/// Equal, one containing the other, or sharing a base surname of at least
/// three letters; all case- and diacritic-insensitive.
pub fn names_match_lax(a: &str, b: &str) -> bool {
    let fa = fold(a.trim());
    let fb = fold(b.trim());
    if fa.is_empty() || fb.is_empty() {
        return false;
    }
    if fa == fb || fa.contains(&fb) || fb.contains(&fa) {
        return true;
    }
    let sa = fold(&base_surname(a));
    let sb = fold(&base_surname(b));
    sa.chars().count() >= 3 && sa == sb
}

/// Lowercase and strip common Latin diacritics ("Dvořák" -> "dvorak")
pub fn fold(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
            'ç' | 'ć' | 'č' => 'c',
            'ď' => 'd',
            'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
            'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => 'i',
            'ł' | 'ľ' => 'l',
            'ñ' | 'ń' | 'ň' => 'n',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ő' | 'ō' => 'o',
            'ř' => 'r',
            'ś' | 'š' | 'ş' => 's',
            'ť' | 'ţ' => 't',
            'ù' | 'ú' | 'û' | 'ü' | 'ů' | 'ű' | 'ū' => 'u',
            'ý' | 'ÿ' => 'y',
            'ź' | 'ż' | 'ž' => 'z',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_name_natural_order() {
        assert_eq!(last_name("Johann Sebastian Bach"), "Bach");
        assert_eq!(last_name("Ludwig van Beethoven"), "van Beethoven");
        assert_eq!(last_name("Tomás Luis de Victoria"), "de Victoria");
        assert_eq!(last_name("Palestrina"), "Palestrina");
        assert_eq!(last_name("   "), "");
    }

    #[test]
    fn test_last_name_reversed_form() {
        assert_eq!(last_name("Bach, Johann Sebastian"), "Bach");
        assert_eq!(last_name("van Beethoven, Ludwig"), "van Beethoven");
    }

    #[test]
    fn test_particle_run() {
        assert_eq!(last_name("Pierre de la Rue"), "de la Rue");
        assert_eq!(base_surname("Pierre de la Rue"), "Rue");
        assert_eq!(given_names("Pierre de la Rue"), vec!["Pierre"]);
    }

    #[test]
    fn test_capitalized_particle_is_not_stripped() {
        // "Van" capitalized is part of the surname proper
        assert_eq!(last_name("Eddie Van Halen"), "Halen");
        assert_eq!(base_surname("Ludwig van Beethoven"), "Beethoven");
        assert_eq!(base_surname("van Beethoven, Ludwig"), "Beethoven");
    }

    #[test]
    fn test_abbreviations() {
        let forms = abbreviations("Johann Sebastian Bach");
        assert!(forms.contains(&"J.S. Bach".to_string()));
        assert!(forms.contains(&"J. S. Bach".to_string()));
        assert!(forms.contains(&"J.S.Bach".to_string()));
        assert!(abbreviations("Palestrina").is_empty());

        let forms = abbreviations("Carl Philipp Emanuel Bach");
        assert!(forms.contains(&"C.P.E. Bach".to_string()));

        let forms = abbreviations("Ludwig van Beethoven");
        assert!(forms.contains(&"L. van Beethoven".to_string()));
        assert!(forms.contains(&"L. Beethoven".to_string()));
    }

    #[test]
    fn test_hyphenated_initials() {
        let forms = abbreviations("Jean-Philippe Rameau");
        assert!(forms.contains(&"J.-P. Rameau".to_string()));
    }

    #[test]
    fn test_dotted_given_names() {
        let forms = abbreviations("Bach, J.S.");
        assert!(forms.contains(&"J.S. Bach".to_string()));
        assert!(forms.contains(&"J. S. Bach".to_string()));
        assert!(has_acceptable_abbreviation("J.S. Bach: Goldberg Variations", "Bach, J.S."));

        let forms = abbreviations("C.P.E. Bach");
        assert!(forms.contains(&"C.P.E. Bach".to_string()));
    }

    #[test]
    fn test_acceptable_abbreviation_in_text() {
        assert!(has_acceptable_abbreviation("J.S. Bach - Cello Suites", "Johann Sebastian Bach"));
        assert!(has_acceptable_abbreviation("j. s. bach: mass in b minor", "Johann Sebastian Bach"));
        assert!(!has_acceptable_abbreviation("Bach - Cello Suites", "Johann Sebastian Bach"));
    }

    #[test]
    fn test_mentions_full_name() {
        assert!(mentions_full_name("Antonín Dvořák - Symphony No. 9", "Antonin Dvorak"));
        assert!(mentions_full_name("Johann Sebastian Bach: Partitas", "Bach, Johann Sebastian"));
        assert!(!mentions_full_name("Bach: Partitas", "Johann Sebastian Bach"));
        assert!(mentions_surname("Bach: Partitas", "Johann Sebastian Bach"));
        assert!(!mentions_surname("Bacharach Songbook", "Johann Sebastian Bach"));
    }

    #[test]
    fn test_names_match_lax() {
        assert!(names_match_lax("Berliner Philharmoniker", "berliner philharmoniker"));
        assert!(names_match_lax("Karajan", "Herbert von Karajan"));
        assert!(names_match_lax("H. von Karajan", "Herbert von Karajan"));
        assert!(!names_match_lax("Claudio Abbado", "Herbert von Karajan"));
        assert!(!names_match_lax("", "Herbert von Karajan"));
    }

    #[test]
    fn test_fold() {
        assert_eq!(fold("Dvořák"), "dvorak");
        assert_eq!(fold("Händel"), "handel");
        assert_eq!(fold("Fauré"), "faure");
    }
}
