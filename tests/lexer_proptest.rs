//! Property-based tests for the scanner.
//!
//! The scanner must be total over arbitrary input - every outcome is an
//! `Ok` token list or a typed error, never a panic - and simple lexeme
//! shapes must always classify the same way.

use proptest::prelude::*;
use pylite::scanner::{Keyword, Scanner};

proptest! {
    #[test]
    fn scanning_never_panics(input in r"[ -~\t\n]{0,80}") {
        // any printable input either tokenizes or fails with a typed error
        let _ = Scanner::new().scan(&input);
    }

    #[test]
    fn scanning_is_pure(input in r"[ -~\t\n]{0,80}") {
        let first = Scanner::new().scan(&input);
        let second = Scanner::new().scan(&input);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn identifier_shapes_lex_to_one_identifier(
        name in r"[a-z_][a-z0-9_]{0,12}".prop_filter(
            "reserved words are keywords, not identifiers",
            |s| Keyword::lookup(s).is_none(),
        )
    ) {
        let tokens = Scanner::new().scan(&name).unwrap();
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].type_name(), "IdentifierToken");
        prop_assert_eq!(tokens[0].text.as_str(), name.as_str());
        prop_assert_eq!(tokens[1].type_name(), "NewLineToken");
    }

    #[test]
    fn digit_runs_lex_to_one_int(digits in r"[0-9]{1,18}") {
        let tokens = Scanner::new().scan(&digits).unwrap();
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].type_name(), "IntToken");
        prop_assert_eq!(tokens[0].text.as_str(), digits.as_str());
    }

    #[test]
    fn float_shapes_lex_to_one_float(text in r"[0-9]{1,9}\.[0-9]{1,9}") {
        let tokens = Scanner::new().scan(&text).unwrap();
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].type_name(), "FloatToken");
    }

    #[test]
    fn keywords_always_win_over_identifiers(keyword in prop::sample::select(&Keyword::ALL[..])) {
        let tokens = Scanner::new().scan(keyword.as_str()).unwrap();
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].text.as_str(), keyword.as_str());
        prop_assert!(tokens[0].type_name().ends_with("Token"));
        prop_assert_ne!(tokens[0].type_name(), "IdentifierToken");
    }

    #[test]
    fn comment_lines_never_reach_the_token_list(body in r"[ -~]{0,40}") {
        let input = format!("# {}", body);
        let tokens = Scanner::new().scan(&input).unwrap();
        prop_assert!(tokens.is_empty());
    }
}
