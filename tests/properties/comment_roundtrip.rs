//! Property tests for rendering and re-parsing comments.

use proptest::prelude::*;

use marginalia::{Comment, CommentStyle};

/// Comment text as an operator would write it: no markers, no edge spaces.
fn comment_line() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9][A-Za-z0-9 ,.!?()_-]{0,40}")
        .unwrap()
        .prop_map(|s| s.trim_end().to_string())
}

fn style() -> impl Strategy<Value = CommentStyle> {
    proptest::sample::select(CommentStyle::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: parse(render(c)) gives back the same lines and style.
    #[test]
    fn property_render_then_parse_round_trips(
        lines in proptest::collection::vec(comment_line(), 1..=6),
        style in style(),
        indent in 0usize..8,
    ) {
        let comment = Comment::new(&lines).with_style(style);
        let rendered = comment.render(indent, CommentStyle::Simple);
        let raw: Vec<&str> = rendered.lines().collect();

        let parsed = Comment::parse(&raw).unwrap();

        prop_assert_eq!(parsed.lines(), comment.lines());
        prop_assert_eq!(parsed.style(), Some(style));
    }

    /// PROPERTY: detected style round-trips with blank lines mixed in.
    ///
    /// A Simple comment of three or more lines whose first and last lines are
    /// blank renders as a Spaced frame, so that shape is excluded.
    #[test]
    fn property_detected_round_trip_with_blank_lines(
        lines in proptest::collection::vec(
            prop_oneof![comment_line(), Just(String::new())],
            0..=6,
        ),
        style in style(),
        indent in 0usize..8,
    ) {
        let spaced_lookalike = style == CommentStyle::Simple
            && lines.len() >= 3
            && lines.first().is_some_and(String::is_empty)
            && lines.last().is_some_and(String::is_empty);
        prop_assume!(!spaced_lookalike);

        let comment = Comment::new(&lines).with_style(style);
        let rendered = comment.render(indent, CommentStyle::Simple);
        let raw: Vec<&str> = rendered.lines().collect();

        let parsed = Comment::parse(&raw).unwrap();

        prop_assert_eq!(parsed.lines(), comment.lines());
        if !lines.is_empty() {
            prop_assert_eq!(parsed.style(), Some(style));
        }
    }

    /// PROPERTY: with a known style, round-trip holds even for blank lines.
    #[test]
    fn property_round_trip_with_known_style(
        lines in proptest::collection::vec(
            prop_oneof![comment_line(), Just(String::new())],
            0..=6,
        ),
        style in style(),
    ) {
        let comment = Comment::new(&lines).with_style(style);
        let rendered = comment.render(0, style);
        let raw: Vec<&str> = rendered.lines().collect();

        let parsed = Comment::parse_with_style(&raw, style).unwrap();

        prop_assert_eq!(parsed.lines(), comment.lines());
    }

    /// PROPERTY: every rendered row starts with the marker after indentation.
    #[test]
    fn property_rendered_rows_are_comments(
        lines in proptest::collection::vec(comment_line(), 0..=6),
        style in style(),
        indent in 0usize..8,
    ) {
        let rendered = Comment::new(&lines).render(indent, style);
        for row in rendered.lines() {
            prop_assert!(row.starts_with(&format!("{}#", " ".repeat(indent))), "row: {:?}", row);
        }
    }
}
