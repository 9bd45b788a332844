#![deny(missing_docs)]
#![doc = "Policy vocabulary, axiom registry and lexer for the SAR codec."]

/// Lexeme catalog, reserved markers and the policy vocabulary.
pub mod catalog;
/// Formula splitting, tokenization and detokenization.
pub mod lexer;
/// Ordered axiom registry with letters and arities.
pub mod registry;

pub use catalog::{
    TokenId, Vocabulary, ADD_CHAR_LEXEME, AXIOM_LETTERS, BOS_LEXEME, CONDITION_LEXEME, EOS_LEXEME,
    MAX_AXIOM_ARITY, MULTI_CHAR_LEXEMES, OBJECTIVE_LEXEME, OUTPUT_START_LEXEME, PADDING_LEXEME,
    POINTER_SYMBOLS, REMOVE_CHAR_LEXEME, VOCABULARY_SIZE,
};
pub use lexer::{formula_from_tokens, split_formula_to_lexemes, tokenize_formula};
pub use registry::{AxiomId, AxiomRegistry};
