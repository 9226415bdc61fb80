//! Lexer for SVG path data using logos

use logos::Logos;

use crate::error::Span;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\x0C]+")]
pub enum Token {
    #[token(",")]
    Comma,

    // Any letter lexes as a command; unknown letters are rejected during
    // geometry interpretation rather than here
    #[regex(r"[A-Za-z]", |lex| lex.slice().chars().next())]
    Command(char),

    // Sign, fraction and exponent; `1.5.5` lexes as 1.5 and .5, `10-5` as 10 and -5
    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),
}

/// Lex path data into tokens with spans
///
/// Fails with the span of the first character that starts no token.
pub fn lex(input: &str) -> Result<Vec<(Token, Span)>, Span> {
    let tokens = Token::lexer(input)
        .spanned()
        .map(|(tok, span)| match tok {
            Ok(t) => Ok((t, span)),
            Err(()) => Err(span),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(split_arc_flags(input, tokens))
}

/// Split arc flags written without separators
///
/// The large-arc and sweep flags of `A`/`a` are single digits, so
/// `a5 5 0 0110 0` reads as `a5 5 0 0 1 10 0`.
fn split_arc_flags(input: &str, tokens: Vec<(Token, Span)>) -> Vec<(Token, Span)> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut arc = false;
    let mut position = 0usize;

    for (token, span) in tokens {
        match token {
            Token::Command(c) => {
                arc = c.eq_ignore_ascii_case(&'a');
                position = 0;
                out.push((Token::Command(c), span));
            }
            Token::Number(n) if arc => {
                let mut start = span.start;
                loop {
                    let rest = &input[start..span.end];
                    let flag_slot = matches!(position % 7, 3 | 4);
                    position += 1;
                    if flag_slot
                        && rest.len() > 1
                        && rest.starts_with(['0', '1'])
                        && rest[1..].parse::<f64>().is_ok()
                    {
                        let digit = if rest.starts_with('1') { 1.0 } else { 0.0 };
                        out.push((Token::Number(digit), start..start + 1));
                        start += 1;
                        continue;
                    }
                    let value = if start == span.start {
                        Some(n)
                    } else {
                        rest.parse::<f64>().ok()
                    };
                    match value {
                        Some(v) => out.push((Token::Number(v), start..span.end)),
                        None => out.push((Token::Number(n), span.clone())),
                    }
                    break;
                }
            }
            other => out.push((other, span)),
        }
    }
    out
}
