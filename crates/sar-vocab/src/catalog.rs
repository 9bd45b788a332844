use std::collections::BTreeMap;

use sar_core::{ErrorInfo, SarError};
use serde::{Deserialize, Serialize};

/// Beginning-of-sequence marker; token id 0 by contract.
pub const BOS_LEXEME: &str = "?";
/// Padding marker; token id 1 by contract.
pub const PADDING_LEXEME: &str = "_";
/// End-of-sequence marker; token id 2 by contract.
pub const EOS_LEXEME: &str = "$";
/// Output-start marker; token id 3 by contract.
pub const OUTPUT_START_LEXEME: &str = "@";
/// Separator between objective statements in an input formula.
pub const OBJECTIVE_LEXEME: &str = "#";
/// Separator between hypothesis statements in an input formula.
pub const CONDITION_LEXEME: &str = "&";
/// Marker prefixed to a character inserted by the diff encoder.
pub const ADD_CHAR_LEXEME: &str = "[+]";
/// Marker prefixed to a character removed by the diff encoder.
pub const REMOVE_CHAR_LEXEME: &str = "[-]";

/// Multi-character lexemes the lexer must keep whole.
pub const MULTI_CHAR_LEXEMES: [&str; 7] = [
    "1/",
    "^2",
    "sqrt",
    "\\leq ",
    "\\geq ",
    ADD_CHAR_LEXEME,
    REMOVE_CHAR_LEXEME,
];

/// Maximum argument count of any axiom; ties the pointer symbol set to the
/// widest action the codec can express.
pub const MAX_AXIOM_ARITY: usize = 3;

/// Reserved characters marking up to [`MAX_AXIOM_ARITY`] simultaneous
/// argument positions in a merged mask, in argument order.
pub const POINTER_SYMBOLS: [char; MAX_AXIOM_ARITY] = ['~', '!', ';'];

/// Uppercase letters assignable to axioms, in canonical registry order.
pub const AXIOM_LETTERS: &str = "ABCDEFGHIJKLMNOPQR";

/// Exact number of entries in the policy vocabulary; externally relied upon.
pub const VOCABULARY_SIZE: usize = 68;

/// Integer token bijective with one vocabulary lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(u16);

impl TokenId {
    /// Creates a token from its raw id.
    pub fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw id of the token.
    pub fn as_raw(&self) -> u16 {
        self.0
    }
}

/// Closed, ordered policy vocabulary with bijective lexeme/token maps.
///
/// Construct once at startup; an `Err` from [`Vocabulary::new`] is a fatal
/// configuration error and the process must not proceed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    lexemes: Vec<String>,
    ids: BTreeMap<String, TokenId>,
}

impl Vocabulary {
    /// Builds the vocabulary and validates its startup invariants:
    /// no duplicate lexemes, exactly [`VOCABULARY_SIZE`] entries, and
    /// BOS/PAD/EOS/OUTPUT_START at ids 0 through 3.
    pub fn new() -> Result<Self, SarError> {
        let mut lexemes: Vec<String> = vec![
            BOS_LEXEME.into(),
            PADDING_LEXEME.into(),
            EOS_LEXEME.into(),
            OUTPUT_START_LEXEME.into(),
            OBJECTIVE_LEXEME.into(),
            CONDITION_LEXEME.into(),
            "=".into(),
            "(".into(),
            ")".into(),
            "*".into(),
            "+".into(),
            "0".into(),
            "1".into(),
            "-".into(),
        ];
        lexemes.extend(('a'..='z').map(String::from));
        lexemes.extend(MULTI_CHAR_LEXEMES.iter().map(|lexeme| (*lexeme).into()));
        lexemes.extend(AXIOM_LETTERS.chars().map(String::from));
        lexemes.extend(POINTER_SYMBOLS.iter().copied().map(String::from));

        let mut ids = BTreeMap::new();
        for (index, lexeme) in lexemes.iter().enumerate() {
            let token = TokenId::from_raw(index as u16);
            if ids.insert(lexeme.clone(), token).is_some() {
                let info = ErrorInfo::new("duplicate-lexeme", "vocabulary lexeme repeats")
                    .with_context("lexeme", lexeme.clone())
                    .with_context("id", index.to_string());
                return Err(SarError::Vocabulary(info));
            }
        }
        if lexemes.len() != VOCABULARY_SIZE {
            let info = ErrorInfo::new("vocabulary-size", "vocabulary has unexpected size")
                .with_context("expected", VOCABULARY_SIZE.to_string())
                .with_context("actual", lexemes.len().to_string());
            return Err(SarError::Vocabulary(info));
        }
        let vocabulary = Self { lexemes, ids };
        for (reserved, id) in [
            (BOS_LEXEME, 0u16),
            (PADDING_LEXEME, 1),
            (EOS_LEXEME, 2),
            (OUTPUT_START_LEXEME, 3),
        ] {
            if vocabulary.id(reserved) != Some(TokenId::from_raw(id)) {
                let info = ErrorInfo::new("reserved-id", "reserved lexeme occupies wrong id")
                    .with_context("lexeme", reserved)
                    .with_context("expected_id", id.to_string());
                return Err(SarError::Vocabulary(info));
            }
        }
        Ok(vocabulary)
    }

    /// Returns the token for a lexeme, if present.
    pub fn id(&self, lexeme: &str) -> Option<TokenId> {
        self.ids.get(lexeme).copied()
    }

    /// Returns the lexeme for a token, if in range.
    pub fn lexeme(&self, token: TokenId) -> Option<&str> {
        self.lexemes.get(token.as_raw() as usize).map(String::as_str)
    }

    /// Returns whether the exact string is a vocabulary lexeme.
    pub fn contains(&self, piece: &str) -> bool {
        self.ids.contains_key(piece)
    }

    /// Returns the total number of tokens.
    pub fn num_tokens(&self) -> usize {
        self.lexemes.len()
    }

    /// Returns the beginning-of-sequence token.
    pub fn bos_token(&self) -> TokenId {
        TokenId::from_raw(0)
    }

    /// Returns the padding token.
    pub fn padding_token(&self) -> TokenId {
        TokenId::from_raw(1)
    }

    /// Returns the end-of-sequence token.
    pub fn eos_token(&self) -> TokenId {
        TokenId::from_raw(2)
    }

    /// Returns the output-start token.
    pub fn output_start_token(&self) -> TokenId {
        TokenId::from_raw(3)
    }
}
