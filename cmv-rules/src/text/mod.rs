//! Shared classical-music text predicates
//!
//! Pure helpers reused across rules: name parsing, title comparison,
//! catalogue and work numbers, encoding sanity and path conventions.

pub mod catalogue;
pub mod encoding;
pub mod names;
pub mod paths;
pub mod titles;

pub use catalogue::{
    catalogue_tokens, has_catalogue_number, has_known_catalogue, work_numbers_conflict,
};
pub use encoding::encoding_problem;
pub use names::{
    base_surname, fold, given_names, has_acceptable_abbreviation, last_name, mentions_full_name,
    names_match_lax,
};
pub use paths::{disc_folder, is_archive, is_disc_folder, title_from_filename};
pub use titles::{compare_titles, contains_word, letter_case, normalize_title, LetterCase, TitleMatch};
