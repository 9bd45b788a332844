use std::cmp::Reverse;

use sar_core::{ErrorInfo, SarError};

use crate::catalog::{TokenId, Vocabulary, MULTI_CHAR_LEXEMES};

/// Splits a formula into the unique lexeme sequence dictated by the
/// vocabulary.
///
/// Multi-character lexemes are carved out first, longest first (stable for
/// equal lengths), with pieces that are already whole vocabulary lexemes left
/// untouched; every remaining piece then splits into single characters. The
/// result may contain pieces outside the vocabulary; only
/// [`tokenize_formula`] rejects those.
pub fn split_formula_to_lexemes<'a>(vocabulary: &Vocabulary, formula: &'a str) -> Vec<&'a str> {
    let mut multi: Vec<&str> = MULTI_CHAR_LEXEMES.to_vec();
    multi.sort_by_key(|lexeme| Reverse(lexeme.len()));

    let mut pieces = vec![formula];
    for lexeme in multi {
        let mut next = Vec::with_capacity(pieces.len());
        for piece in pieces {
            if vocabulary.contains(piece) {
                next.push(piece);
            } else {
                split_on_lexeme(piece, lexeme, &mut next);
            }
        }
        pieces = next;
    }

    let mut lexemes = Vec::with_capacity(pieces.len());
    for piece in pieces {
        if vocabulary.contains(piece) {
            lexemes.push(piece);
        } else {
            let mut rest = piece;
            while let Some(c) = rest.chars().next() {
                let (head, tail) = rest.split_at(c.len_utf8());
                lexemes.push(head);
                rest = tail;
            }
        }
    }
    lexemes
}

fn split_on_lexeme<'a>(piece: &'a str, lexeme: &str, out: &mut Vec<&'a str>) {
    let mut begin = 0;
    while let Some(found) = piece[begin..].find(lexeme) {
        let at = begin + found;
        if at > begin {
            out.push(&piece[begin..at]);
        }
        out.push(&piece[at..at + lexeme.len()]);
        begin = at + lexeme.len();
    }
    if begin < piece.len() {
        out.push(&piece[begin..]);
    }
}

/// Converts a formula into its token id sequence.
///
/// Fails naming the full lexeme breakdown if any piece is absent from the
/// vocabulary.
pub fn tokenize_formula(vocabulary: &Vocabulary, formula: &str) -> Result<Vec<TokenId>, SarError> {
    let lexemes = split_formula_to_lexemes(vocabulary, formula);
    let mut tokens = Vec::with_capacity(lexemes.len());
    for lexeme in &lexemes {
        match vocabulary.id(lexeme) {
            Some(token) => tokens.push(token),
            None => {
                let info = ErrorInfo::new("unrecognized-lexeme", "formula contains unknown lexeme")
                    .with_context("lexeme", *lexeme)
                    .with_context("breakdown", format!("{lexemes:?}"));
                return Err(SarError::Tokenize(info));
            }
        }
    }
    Ok(tokens)
}

/// Concatenates the lexemes of a token sequence, with no added delimiters.
pub fn formula_from_tokens(vocabulary: &Vocabulary, tokens: &[TokenId]) -> Result<String, SarError> {
    let mut formula = String::new();
    for token in tokens {
        match vocabulary.lexeme(*token) {
            Some(lexeme) => formula.push_str(lexeme),
            None => {
                let info = ErrorInfo::new("token-out-of-range", "token id outside vocabulary")
                    .with_context("token", token.as_raw().to_string())
                    .with_context("num_tokens", vocabulary.num_tokens().to_string());
                return Err(SarError::Tokenize(info));
            }
        }
    }
    Ok(formula)
}
