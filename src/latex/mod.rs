//! Flashcard extraction from LaTeX source.
//!
//! Two spellings of a card are recognized:
//!
//! ```latex
//! \begin{flashcard}[optional]{What is $e^{i\pi}$?}
//!   $-1$
//! \end{flashcard}
//!
//! \flashcard{What is $e^{i\pi}$?}{$-1$}
//! ```
//!
//! The first brace group is the card title (the front), the remaining content
//! is the body (the back), kept as raw LaTeX so Anki can typeset it.
//! Anything inside a `%` comment is ignored when looking for cards.

mod scanner;

use scanner::Scanner;
use thiserror::Error;

const ENVIRONMENT: &str = "flashcard";

/// A flashcard found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    /// Card title, whitespace-trimmed.
    pub front: String,
    /// Raw LaTeX source of the card body, whitespace-trimmed.
    pub body: String,
    /// 1-based line where the card starts.
    pub line: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: flashcard has no title argument")]
    MissingTitle { line: usize },

    #[error("line {line}: \\flashcard macro has no body argument")]
    MissingBody { line: usize },

    #[error("line {line}: unbalanced braces")]
    UnbalancedBraces { line: usize },

    #[error("line {line}: flashcard environment is never closed")]
    Unterminated { line: usize },
}

/// Extracts every flashcard from `source`, in document order.
pub fn parse_flashcards(source: &str) -> Result<Vec<Flashcard>, ParseError> {
    let scanner = Scanner::new(source);
    let mut cards = Vec::new();
    let mut pos = 0;

    while let Some(b) = scanner.byte(pos) {
        match b {
            b'%' => pos = scanner.skip_comment(pos),
            b'\\' => {
                let (name, after) = scanner.control_word(pos);
                pos = match name {
                    "begin" => match scanner.environment_name(after)? {
                        Some((ENVIRONMENT, after_name)) => {
                            let (card, next) = parse_environment(&scanner, pos, after_name)?;
                            cards.push(card);
                            next
                        }
                        _ => after,
                    },
                    ENVIRONMENT => match parse_macro(&scanner, pos, after)? {
                        Some((card, next)) => {
                            cards.push(card);
                            next
                        }
                        None => after,
                    },
                    _ => after,
                };
            }
            _ => pos += 1,
        }
    }

    Ok(cards)
}

/// Reads the mandatory title group following `pos`.
fn title(scanner: &Scanner<'_>, start: usize, pos: usize) -> Result<(String, usize), ParseError> {
    let pos = scanner.skip_blank(pos);
    if scanner.byte(pos) != Some(b'{') {
        return Err(ParseError::MissingTitle {
            line: scanner.line_at(start),
        });
    }
    let (inner_start, inner_end, after) = scanner.group(pos)?;
    Ok((scanner.slice(inner_start, inner_end).trim().to_string(), after))
}

/// `\begin{flashcard}` at `start`, environment name ending at `pos`.
fn parse_environment(
    scanner: &Scanner<'_>,
    start: usize,
    pos: usize,
) -> Result<(Flashcard, usize), ParseError> {
    let pos = scanner.skip_optional(scanner.skip_blank(pos))?;
    let (front, body_start) = title(scanner, start, pos)?;

    let mut depth = 0usize;
    let mut i = body_start;
    while let Some(b) = scanner.byte(i) {
        match b {
            b'%' => i = scanner.skip_comment(i),
            b'\\' => {
                let (name, after) = scanner.control_word(i);
                i = match name {
                    "begin" | "end" => match scanner.environment_name(after)? {
                        Some((ENVIRONMENT, after_name)) if name == "begin" => {
                            depth += 1;
                            after_name
                        }
                        Some((ENVIRONMENT, after_name)) if depth > 0 => {
                            depth -= 1;
                            after_name
                        }
                        Some((ENVIRONMENT, after_name)) => {
                            let card = Flashcard {
                                front,
                                body: scanner.slice(body_start, i).trim().to_string(),
                                line: scanner.line_at(start),
                            };
                            return Ok((card, after_name));
                        }
                        _ => after,
                    },
                    _ => after,
                };
            }
            _ => i += 1,
        }
    }

    Err(ParseError::Unterminated {
        line: scanner.line_at(start),
    })
}

/// `\flashcard` at `start`, command name ending at `pos`.
///
/// Without a following brace group this is a mention of the macro (as in
/// `\newcommand{\flashcard}[2]{...}`), not a card.
fn parse_macro(
    scanner: &Scanner<'_>,
    start: usize,
    pos: usize,
) -> Result<Option<(Flashcard, usize)>, ParseError> {
    if scanner.byte(scanner.skip_blank(pos)) != Some(b'{') {
        return Ok(None);
    }
    let (front, after_title) = title(scanner, start, pos)?;

    let pos = scanner.skip_blank(after_title);
    if scanner.byte(pos) != Some(b'{') {
        return Err(ParseError::MissingBody {
            line: scanner.line_at(start),
        });
    }
    let (inner_start, inner_end, after) = scanner.group(pos)?;

    let card = Flashcard {
        front,
        body: scanner.slice(inner_start, inner_end).trim().to_string(),
        line: scanner.line_at(start),
    };
    Ok(Some((card, after)))
}
