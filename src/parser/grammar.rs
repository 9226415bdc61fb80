//! Path data parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::SyntaxError;
use crate::parser::ast::*;
use crate::parser::lexer::{self, Token};

/// Parse the contents of a `d` attribute into segments
pub fn parse_path_data(input: &str) -> Result<PathData, Vec<SyntaxError>> {
    let len = input.len();

    let tokens = lexer::lex(input)
        .map_err(|span| vec![SyntaxError::unexpected_character(input, span)])?;
    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    path_data_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(SyntaxError::from).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn path_data_parser<'a, I>() -> impl Parser<'a, I, PathData, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let number = select! {
        Token::Number(n) => n,
    };

    let command = select! {
        Token::Command(c) => c,
    };

    // Arguments may be separated by whitespace, a comma, or nothing at all
    let arguments = number
        .then_ignore(just(Token::Comma).or_not())
        .repeated()
        .collect::<Vec<_>>();

    let segment = command
        .then(arguments)
        .map_with(|(command, args), e| Segment::new(command, args, span_range(&e.span())));

    segment
        .repeated()
        .collect()
        .then_ignore(end())
        .map(PathData::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_path() {
        let data = parse_path_data("M 0 0 L 10 0").expect("Should parse");
        assert_eq!(data.segments.len(), 2);
        assert_eq!(data.segments[0].command, 'M');
        assert_eq!(data.segments[0].args, vec![0.0, 0.0]);
        assert_eq!(data.segments[1].command, 'L');
        assert_eq!(data.segments[1].args, vec![10.0, 0.0]);
    }

    #[test]
    fn test_parse_compact_path() {
        let data = parse_path_data("M0,0l10-5h.5v-1.5z").expect("Should parse");
        let commands: Vec<char> = data.segments.iter().map(|s| s.command).collect();
        assert_eq!(commands, vec!['M', 'l', 'h', 'v', 'z']);
        assert_eq!(data.segments[1].args, vec![10.0, -5.0]);
        assert_eq!(data.segments[2].args, vec![0.5]);
        assert!(data.segments[4].args.is_empty());
    }

    #[test]
    fn test_parse_implicit_repetition_stays_in_one_segment() {
        let data = parse_path_data("M 0 0 10 10 20 0").expect("Should parse");
        assert_eq!(data.segments.len(), 1);
        assert_eq!(data.segments[0].args.len(), 6);
    }

    #[test]
    fn test_segment_spans() {
        let data = parse_path_data("M 1 2 L 3 4").expect("Should parse");
        assert_eq!(data.segments[0].span, 0..5);
        assert_eq!(data.segments[1].span, 6..11);
    }

    #[test]
    fn test_parse_empty_path() {
        let data = parse_path_data("   ").expect("Should parse");
        assert!(data.is_empty());
    }

    #[test]
    fn test_leading_number_is_error() {
        let errors = parse_path_data("10 M 0 0").unwrap_err();
        assert!(!errors.is_empty());
        assert_eq!(errors[0].span.start, 0);
    }

    #[test]
    fn test_double_comma_is_error() {
        let result = parse_path_data("M 0,,0");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_character_is_error() {
        let errors = parse_path_data("M 0 0 L 5 % 5").unwrap_err();
        assert_eq!(errors[0].span, 10..11);
        assert!(errors[0].message.contains('%'));
    }

    #[test]
    fn test_unknown_letter_parses_syntactically() {
        // Interpretation, not parsing, rejects unknown commands
        let data = parse_path_data("M 0 0 X 5 5").expect("Should parse");
        assert_eq!(data.segments[1].command, 'X');
    }
}
