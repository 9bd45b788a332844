use sar_core::{ErrorInfo, SarError};
use sar_vocab::{ADD_CHAR_LEXEME, REMOVE_CHAR_LEXEME};

/// Multi-character lexemes collapsed to a reserved placeholder before the
/// character-level alignment, so the alignment cannot split them.
const PLACEHOLDERS: [(&str, char); 4] = [("1/", '~'), ("^2", '!'), ("\\geq ", '%'), ("\\leq ", ';')];

/// Annotates the current formula with the insert/remove markers of the
/// minimal edit reaching the destination formula.
///
/// Characters present only in the source are prefixed with `[-]`; characters
/// present only in the destination are inserted as `[+]` plus the character.
/// At each alignment point removals precede insertions, following
/// source-then-destination positional order. Diffing a string against itself
/// returns it unchanged.
pub fn find_diff(current: &str, destination: &str) -> Result<String, SarError> {
    let source: Vec<char> = substitute(current)?.chars().collect();
    let target: Vec<char> = substitute(destination)?.chars().collect();

    // Longest-common-subsequence lengths for every suffix pair.
    let mut lcs = vec![vec![0usize; target.len() + 1]; source.len() + 1];
    for i in (0..source.len()).rev() {
        for j in (0..target.len()).rev() {
            lcs[i][j] = if source[i] == target[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut annotated = String::with_capacity(source.len() + target.len());
    let (mut i, mut j) = (0, 0);
    while i < source.len() && j < target.len() {
        if source[i] == target[j] {
            annotated.push(source[i]);
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            annotated.push_str(REMOVE_CHAR_LEXEME);
            annotated.push(source[i]);
            i += 1;
        } else {
            annotated.push_str(ADD_CHAR_LEXEME);
            annotated.push(target[j]);
            j += 1;
        }
    }
    while i < source.len() {
        annotated.push_str(REMOVE_CHAR_LEXEME);
        annotated.push(source[i]);
        i += 1;
    }
    while j < target.len() {
        annotated.push_str(ADD_CHAR_LEXEME);
        annotated.push(target[j]);
        j += 1;
    }

    Ok(restore(&annotated))
}

fn substitute(formula: &str) -> Result<String, SarError> {
    for (_, placeholder) in PLACEHOLDERS {
        if formula.contains(placeholder) {
            let info = ErrorInfo::new("reserved-character", "formula contains a diff placeholder")
                .with_context("character", placeholder.to_string())
                .with_context("formula", formula);
            return Err(SarError::Diff(info));
        }
    }
    let mut normalized = formula.to_owned();
    for (lexeme, placeholder) in PLACEHOLDERS {
        normalized = normalized.replace(lexeme, &placeholder.to_string());
    }
    Ok(normalized)
}

fn restore(annotated: &str) -> String {
    let mut formula = annotated.to_owned();
    for (lexeme, placeholder) in PLACEHOLDERS {
        formula = formula.replace(&placeholder.to_string(), lexeme);
    }
    formula
}
