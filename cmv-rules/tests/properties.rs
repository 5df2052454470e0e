//! Invariants that hold for any input

use cmv_common::{Album, Artist, Edition, FixedClock, Severity, Track};
use cmv_rules::{Engine, RuleRegistry};
use std::collections::HashMap;

const CURRENT_YEAR: i32 = 2025;

fn engine() -> Engine {
    Engine::standard()
        .expect("standard registry is valid")
        .with_clock(Box::new(FixedClock(CURRENT_YEAR)))
}

/// Two-disc album exercising most rules
fn messy_album() -> Album {
    Album::new("bach - cello suites CD 1")
        .with_year(1939)
        .with_edition(Edition {
            label: Some("EMI".to_string()),
            catalog_number: None,
            year: Some(1988),
        })
        .with_track(
            Track::new(1, 1, "Suite No. 1 in G major")
                .with_artist(Artist::composer("Johann Sebastian Bach"))
                .with_artist(Artist::soloist("Pablo Casals"))
                .with_path("CD1/Extra/01 - Suite No. 1.flac"),
        )
        .with_track(
            Track::new(1, 3, "Bach: Suite No. 2, BWV 1008")
                .with_artist(Artist::soloist("Casals; Moore"))
                .with_artist(Artist::composer("Johann Sebastian Bach"))
                .with_path("CD1/03 - Gigue.flac"),
        )
        .with_track(
            Track::new(3, 2, "SUITE NO. 3")
                .with_artist(Artist::conductor("Someone"))
                .with_artist(Artist::soloist("Pablo Casals"))
                .with_path("scans.rar"),
        )
}

fn cap_for(engine: &Engine) -> HashMap<&'static str, Severity> {
    engine
        .registry()
        .metadata()
        .into_iter()
        .map(|m| (m.id, m.severity))
        .collect()
}

#[test]
fn test_checks_are_deterministic() {
    let album = messy_album();
    let reference = messy_album().with_year(1940);
    let engine = engine();
    assert_eq!(
        engine.check(&album, Some(&reference)),
        engine.check(&album, Some(&reference))
    );
}

#[test]
fn test_no_issue_exceeds_its_rule_severity() {
    let engine = engine();
    let caps = cap_for(&engine);
    let result = engine.check(&messy_album(), Some(&messy_album().with_year(1950)));
    assert!(!result.issues.is_empty());
    for issue in &result.issues {
        let cap = caps[issue.rule_id.as_str()];
        assert!(issue.severity <= cap, "{} exceeds {}", issue, cap);
    }
}

#[test]
fn test_issues_reference_real_tracks() {
    let album = messy_album();
    let result = engine().check(&album, None);
    for issue in &result.issues {
        assert!(
            issue.is_album_scope() || album.tracks.iter().any(|t| t.number == issue.track),
            "{}",
            issue
        );
    }
}

#[test]
fn test_self_comparison_has_no_accuracy_errors() {
    let album = messy_album();
    let result = engine().check(&album, Some(&album));
    for id in ["2.3.6", "2.3.18.4", "classical.record_label.accuracy", "2.3.18.2.ref"] {
        assert!(
            result.result(id).expect("rule installed").passed(),
            "{} failed on identical albums",
            id
        );
    }
    assert!(result
        .issues_for_rule("2.3.8")
        .all(|i| !i.message.contains("reference")));
}

#[test]
fn test_without_reference_no_message_mentions_it() {
    let result = engine().check(&messy_album(), None);
    assert!(result.issues.iter().all(|i| !i.message.contains("reference")));
}

#[test]
fn test_score_bounds() {
    let result = engine().check(&messy_album(), None);
    assert!((0.0..1.0).contains(&result.score));
    assert_eq!(result.passed + result.failed, result.total);

    // A rule set the album satisfies scores exactly 1
    let mut registry = RuleRegistry::new();
    registry.register_album(cmv_rules::rules::structure::NoArchives);
    let engine = Engine::new(registry).expect("registry is valid");
    let clean = engine.check(&Album::new("Empty"), None);
    assert_eq!(clean.score, 1.0);
    assert!(clean.all_passed());
}

#[test]
fn test_zero_tracks() {
    let album = Album::new("Nothing Here").with_year(2000);
    let engine = engine();
    let result = engine.check(&album, None);

    let required = result.result("2.3.16.4").expect("rule installed");
    assert_eq!(required.issues.len(), 1);
    assert_eq!(required.issues[0].severity, Severity::Error);

    for meta in engine.registry().track_rules().iter().map(|r| *r.metadata()) {
        assert!(result.result(meta.id).expect("rule reported").passed());
    }
}

#[test]
fn test_album_artist_suggestion_boundary() {
    let ensemble_only = Album::new("Brahms - Symphony No. 4")
        .with_year(1981)
        .with_track(
            Track::new(1, 1, "Symphony No. 4, Op. 98")
                .with_artist(Artist::composer("Johannes Brahms"))
                .with_artist(Artist::ensemble("Wiener Philharmoniker"))
                .with_artist(Artist::conductor("Carlos Kleiber")),
        );
    let result = engine().check(&ensemble_only, None);
    let suggestions: Vec<_> = result.issues_for_rule("2.3.7-present").collect();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].severity, Severity::Info);

    let mut with_soloist = ensemble_only.clone();
    with_soloist.tracks[0].artists.insert(1, Artist::soloist("Maurizio Pollini"));
    let result = engine().check(&with_soloist, None);
    assert!(result.result("2.3.7-present").expect("rule installed").passed());
}

#[test]
fn test_year_boundary() {
    let album = |year: u32| {
        Album::new("Arvo Pärt - Tabula Rasa").with_year(year).with_track(
            Track::new(1, 1, "Fratres")
                .with_artist(Artist::composer("Arvo Pärt"))
                .with_artist(Artist::soloist("Gidon Kremer")),
        )
    };

    let next_year = engine().check(&album(CURRENT_YEAR as u32 + 1), None);
    assert!(next_year.result("2.3.8").expect("rule installed").passed());

    let two_ahead = engine().check(&album(CURRENT_YEAR as u32 + 2), None);
    let issues: Vec<_> = two_ahead.issues_for_rule("2.3.8").collect();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Error);
}

#[test]
fn test_huge_numbers_do_not_exhaust_memory() {
    let json = r#"{
        "title": "Preludes",
        "year": 1990,
        "tracks": [
            { "disc": 1, "number": 1, "title": "Prelude",
              "artists": [{ "name": "Martha Argerich", "role": "soloist" }] },
            { "disc": 3000000000, "number": 300000000, "title": "Prelude",
              "artists": [{ "name": "Martha Argerich", "role": "soloist" }] }
        ]
    }"#;
    let album = Album::from_json(json).expect("album parses");
    let result = engine().check(&album, None);
    assert!(result
        .issues
        .iter()
        .any(|i| i.rule_id == "2.3.15" && i.message.contains("discs 2-2999999999")));
}

#[test]
fn test_reference_with_extra_opus_number_is_not_an_error() {
    let album = |title: &str| {
        Album::new("Beethoven: Symphony No. 5")
            .with_year(1963)
            .with_track(
                Track::new(1, 1, title)
                    .with_artist(Artist::composer("Ludwig van Beethoven"))
                    .with_artist(Artist::ensemble("Berliner Philharmoniker")),
            )
    };
    let result = engine().check(&album("Symphony No. 5"), Some(&album("Symphony No. 5, Op. 67")));
    assert!(
        result.issues.iter().all(|i| i.rule_id != "2.3.18.4"),
        "{:?}",
        result.issues
    );
}
