//! Integration tests for flashcard extraction with fixture files.

use std::path::PathBuf;

use latex2anki::convert::{back_text, front_text};
use latex2anki::{parse_flashcards, Flashcard};

/// Helper: get absolute path to a test fixture file.
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn parse_fixture(name: &str) -> Vec<Flashcard> {
    let path = fixture_path(name);
    assert!(path.exists(), "Fixture file missing: {:?}", path);
    let source = std::fs::read_to_string(&path).expect("Failed to read fixture");
    parse_flashcards(&source).expect("Failed to parse fixture")
}

// ===========================================================================
// Minimal document
// ===========================================================================

mod two_cards {
    use super::*;

    #[test]
    fn test_cards_in_document_order() {
        let cards = parse_fixture("two_cards.tex");
        let fronts: Vec<_> = cards.iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts, vec!["A", "B"]);
    }

    #[test]
    fn test_bodies_and_lines() {
        let cards = parse_fixture("two_cards.tex");
        assert_eq!(cards[0].body, "a-body");
        assert_eq!(cards[0].line, 7);
        assert_eq!(cards[1].body, "b-body");
        assert_eq!(cards[1].line, 11);
    }

    #[test]
    fn test_field_text() {
        let cards = parse_fixture("two_cards.tex");
        assert_eq!(front_text(&cards[0]), "A");
        assert_eq!(back_text(&cards[0]), "[latex]\na-body\n[/latex]\n");
    }
}

// ===========================================================================
// Realistic notes with preamble definitions, comments and both card forms
// ===========================================================================

mod mixed {
    use super::*;

    #[test]
    fn test_preamble_and_commented_cards_are_skipped() {
        let cards = parse_fixture("mixed.tex");
        let fronts: Vec<_> = cards.iter().map(|c| c.front.as_str()).collect();
        assert_eq!(
            fronts,
            vec!["Rank--nullity theorem", "Trace of $AB$", "Cauchy--Schwarz"]
        );
    }

    #[test]
    fn test_nested_environment_stays_in_body() {
        let cards = parse_fixture("mixed.tex");
        assert!(cards[0].body.starts_with("For $T\\colon V \\to W$"));
        assert!(cards[0].body.contains("\\begin{equation*}"));
        assert!(cards[0].body.ends_with("\\end{equation*}"));
        assert_eq!(cards[0].line, 12);
    }

    #[test]
    fn test_macro_body_keeps_comment() {
        let cards = parse_fixture("mixed.tex");
        assert_eq!(
            cards[1].body,
            "$\\operatorname{tr}(AB) = \\operatorname{tr}(BA)$ % cyclic"
        );
        assert_eq!(cards[1].line, 19);
    }

    #[test]
    fn test_back_text_escapes_html() {
        let cards = parse_fixture("mixed.tex");
        let back = back_text(&cards[0]);
        assert!(back.starts_with("[latex]\n"));
        assert!(back.ends_with("\n[/latex]\n"));
        assert!(back.contains("$\\dim V &lt; \\infty$"));
    }
}
