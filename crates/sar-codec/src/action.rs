use sar_core::{EntityId, ErrorInfo, ProofState, SarError, Statement};
use sar_vocab::{
    tokenize_formula, AxiomId, AxiomRegistry, TokenId, Vocabulary, EOS_LEXEME,
    OUTPUT_START_LEXEME, POINTER_SYMBOLS,
};
use serde::{Deserialize, Serialize};

use crate::input::{self, Destination};
use crate::mask::{generate_masks, DEFAULT_MASK_SYMBOL};
use crate::merge::merge_masks;

/// Reference to an axiom at the encode surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxiomRef {
    /// Symbolic registry name.
    Name(String),
    /// Canonical registry index.
    Index(usize),
}

/// Reference to an argument entity at the encode surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityRef {
    /// Entity identifier within the objective's table.
    Id(EntityId),
    /// Raw index into the objective's entity table.
    Index(usize),
}

/// Proof action decoded from a policy prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Applied axiom.
    pub axiom: AxiomId,
    /// Argument entities, in axiom argument order.
    pub entities: Vec<EntityId>,
}

/// Encoder/decoder between proof actions and annotated policy strings.
///
/// Holds only shared immutable configuration; every call rebuilds its mask
/// tables from the statement passed in, so independent statements can be
/// processed concurrently.
#[derive(Debug, Clone, Copy)]
pub struct ActionCodec<'a> {
    vocabulary: &'a Vocabulary,
    registry: &'a AxiomRegistry,
    vanilla: bool,
}

impl<'a> ActionCodec<'a> {
    /// Creates a codec over a vocabulary and axiom registry.
    pub fn new(vocabulary: &'a Vocabulary, registry: &'a AxiomRegistry) -> Self {
        Self {
            vocabulary,
            registry,
            vanilla: false,
        }
    }

    /// Switches literal input mode: the rendered objective is passed through
    /// instead of being replaced by its diff against the destination.
    pub fn vanilla(mut self, vanilla: bool) -> Self {
        self.vanilla = vanilla;
        self
    }

    /// Encodes a proof action against an objective as
    /// `@<letter><merged masks>$`.
    pub fn encode(
        &self,
        objective: &Statement,
        axiom: &AxiomRef,
        entities: &[EntityRef],
    ) -> Result<String, SarError> {
        let axiom_id = self.resolve_axiom(axiom)?;
        let arity = self.arity_of(axiom_id)?;
        if entities.len() != arity {
            let info = ErrorInfo::new("argument-count-mismatch", "wrong argument count for axiom")
                .with_context("axiom", self.name_of(axiom_id))
                .with_context("expected", arity.to_string())
                .with_context("provided", entities.len().to_string());
            return Err(SarError::Action(info));
        }
        let letter = self.letter_of(axiom_id)?;

        let masks = generate_masks(objective, DEFAULT_MASK_SYMBOL)?;
        let mut argument_masks = Vec::with_capacity(entities.len());
        for entity in entities {
            let id = resolve_entity(objective, entity)?;
            match masks.mask_of(id) {
                Some(mask) => argument_masks.push(mask),
                None => {
                    let info = ErrorInfo::new(
                        "entity-not-in-objective",
                        "argument entity unreachable in objective",
                    )
                    .with_context("id", id.as_raw().to_string());
                    return Err(SarError::Action(info));
                }
            }
        }
        let merged = merge_masks(&argument_masks, DEFAULT_MASK_SYMBOL)?;
        Ok(format!("{OUTPUT_START_LEXEME}{letter}{merged}{EOS_LEXEME}"))
    }

    /// Decodes a predicted string back into an action against an objective.
    ///
    /// Returns `Ok(None)` for the empty prediction `@$`, which is a no-op.
    /// Fails on missing delimiters, unrecognized axiom letters, or masks with
    /// no matching entity.
    pub fn decode(
        &self,
        objective: &Statement,
        prediction: &str,
    ) -> Result<Option<Action>, SarError> {
        let interior = prediction
            .strip_prefix(OUTPUT_START_LEXEME)
            .and_then(|rest| rest.strip_suffix(EOS_LEXEME))
            .ok_or_else(|| {
                SarError::Action(
                    ErrorInfo::new("invalid-prediction-format", "prediction lacks delimiters")
                        .with_context("prediction", prediction)
                        .with_hint("expected '@...$'"),
                )
            })?;
        if interior.is_empty() {
            return Ok(None);
        }

        let mut chars = interior.chars();
        let letter = match chars.next() {
            Some(letter) => letter,
            None => return Ok(None),
        };
        let payload = chars.as_str();
        let axiom_id = self.registry.by_letter(letter).ok_or_else(|| {
            SarError::Action(
                ErrorInfo::new("unrecognized-axiom-letter", "letter maps to no axiom")
                    .with_context("letter", letter.to_string()),
            )
        })?;
        let arity = self.arity_of(axiom_id)?;

        let masks = generate_masks(objective, DEFAULT_MASK_SYMBOL)?;
        let mut entities = Vec::with_capacity(arity);
        for slot in 0..arity {
            let own_symbol = POINTER_SYMBOLS[slot];
            let mut mask = String::with_capacity(payload.len());
            for c in payload.chars() {
                if c == own_symbol {
                    mask.push(DEFAULT_MASK_SYMBOL);
                } else if !POINTER_SYMBOLS.contains(&c) {
                    mask.push(c);
                }
            }
            match masks.entity_of(&mask) {
                Some(id) => entities.push(id),
                None => {
                    let info = ErrorInfo::new("unrecognized-entity-mask", "mask matches no entity")
                        .with_context("slot", slot.to_string())
                        .with_context("mask", mask);
                    return Err(SarError::Action(info));
                }
            }
        }
        Ok(Some(Action {
            axiom: axiom_id,
            entities,
        }))
    }

    /// Decodes a prediction into registry and entity-table indices.
    pub fn decode_indexed(
        &self,
        objective: &Statement,
        prediction: &str,
    ) -> Result<Option<(usize, Vec<usize>)>, SarError> {
        Ok(self.decode(objective, prediction)?.map(|action| {
            (
                action.axiom.as_raw(),
                action.entities.iter().map(EntityId::as_raw).collect(),
            )
        }))
    }

    /// Builds the policy input formula for a proof state, diffed against the
    /// destination unless the codec runs in vanilla mode.
    pub fn policy_input_formula(
        &self,
        state: &ProofState,
        destination: &Destination<'_>,
    ) -> Result<String, SarError> {
        input::policy_input_formula(state, destination, self.vanilla)
    }

    /// Tokenizes the rendering of the state's first objective.
    pub fn tokenized_objective(&self, state: &ProofState) -> Result<Vec<TokenId>, SarError> {
        let objective = state.objectives.first().ok_or_else(|| {
            SarError::Action(ErrorInfo::new(
                "missing-objective",
                "proof state has no objective statement",
            ))
        })?;
        tokenize_formula(self.vocabulary, &objective.render()?)
    }

    fn resolve_axiom(&self, axiom: &AxiomRef) -> Result<AxiomId, SarError> {
        match axiom {
            AxiomRef::Name(name) => self.registry.index_of(name).ok_or_else(|| {
                SarError::Action(
                    ErrorInfo::new("unrecognized-axiom", "name absent from registry")
                        .with_context("axiom", name.clone()),
                )
            }),
            AxiomRef::Index(index) => {
                if *index < self.registry.len() {
                    Ok(AxiomId::from_raw(*index))
                } else {
                    let info = ErrorInfo::new("axiom-index-out-of-range", "index beyond registry")
                        .with_context("index", index.to_string())
                        .with_context("registry_len", self.registry.len().to_string());
                    Err(SarError::Action(info))
                }
            }
        }
    }

    fn arity_of(&self, id: AxiomId) -> Result<usize, SarError> {
        self.registry.arity(id).ok_or_else(|| registry_gap(id))
    }

    fn letter_of(&self, id: AxiomId) -> Result<char, SarError> {
        self.registry.letter(id).ok_or_else(|| registry_gap(id))
    }

    fn name_of(&self, id: AxiomId) -> String {
        self.registry.name(id).unwrap_or("<unknown>").to_owned()
    }
}

fn resolve_entity(objective: &Statement, entity: &EntityRef) -> Result<EntityId, SarError> {
    let id = match entity {
        EntityRef::Id(id) => *id,
        EntityRef::Index(index) => EntityId::from_raw(*index),
    };
    objective.table().get(id)?;
    Ok(id)
}

fn registry_gap(id: AxiomId) -> SarError {
    SarError::Action(
        ErrorInfo::new("axiom-index-out-of-range", "index beyond registry")
            .with_context("index", id.as_raw().to_string()),
    )
}
