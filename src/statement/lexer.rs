use chumsky::{prelude::*, regex::regex};

#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    Keyword(&'a str),
    Integer(&'a str),
    Word(&'a str),
}

impl<'a> Token<'a> {
    /// The source text of the token
    pub fn text(&self) -> &'a str {
        match self {
            Token::Keyword(s) | Token::Integer(s) | Token::Word(s) => s,
        }
    }
}

pub fn lexer<'a>() -> impl Parser<'a, &'a str, Vec<Token<'a>>, extra::Err<Rich<'a, char>>> {
    // Fields are whitespace separated, so every non-space run is one token
    let token = regex(r"\S+").map(classify).padded();

    text::whitespace()
        .ignore_then(token.repeated().collect::<Vec<_>>())
        .then_ignore(end())
}

/// Tag a whitespace-delimited run as a keyword, an integer, or a plain word.
/// Integers are kept as text; range checks happen when the statement is prepared.
fn classify(run: &str) -> Token<'_> {
    let digits = run.strip_prefix('-').unwrap_or(run);
    match run {
        "insert" | "select" => Token::Keyword(run),
        _ if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            Token::Integer(run)
        }
        _ => Token::Word(run),
    }
}
