use std::collections::BTreeMap;

use sar_core::{ErrorInfo, SarError};
use serde::{Deserialize, Serialize};

use crate::catalog::{AXIOM_LETTERS, MAX_AXIOM_ARITY};

/// Canonical index of an axiom within an [`AxiomRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AxiomId(usize);

impl AxiomId {
    /// Creates an identifier from its raw registry index.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw registry index of the identifier.
    pub fn as_raw(&self) -> usize {
        self.0
    }
}

/// Ordered registry of axiom names with their fixed argument arities.
///
/// The registry defines the canonical numeric index of every axiom and the
/// single uppercase letter the codec emits for it. Constructed once at
/// startup and passed by reference into the codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxiomRegistry {
    names: Vec<String>,
    arities: Vec<usize>,
    index_by_name: BTreeMap<String, AxiomId>,
}

/// Names and arities of the eighteen field axioms, in canonical order.
const STANDARD_AXIOMS: [(&str, usize); 18] = [
    ("AdditionCommutativity", 1),
    ("AdditionAssociativity", 1),
    ("AdditionZero", 1),
    ("AdditionSimplification", 1),
    ("MultiplicationCommutativity", 1),
    ("MultiplicationAssociativity", 1),
    ("MultiplicationOne", 1),
    ("MultiplicationSimplification", 1),
    ("AdditionMultiplicationLeftDistribution", 1),
    ("AdditionMultiplicationRightDistribution", 1),
    ("SquareDefinition", 1),
    ("EquMoveTerm", 3),
    ("PrincipleOfEquality", 2),
    ("SquareGEQZero", 1),
    ("EquivalenceImpliesDoubleInequality", 2),
    ("FirstPrincipleOfInequality", 2),
    ("SecondPrincipleOfInequality", 2),
    ("IneqMoveTerm", 2),
];

impl AxiomRegistry {
    /// Builds the registry of the standard field axioms.
    pub fn standard() -> Self {
        let mut names = Vec::with_capacity(STANDARD_AXIOMS.len());
        let mut arities = Vec::with_capacity(STANDARD_AXIOMS.len());
        let mut index_by_name = BTreeMap::new();
        for (index, (name, arity)) in STANDARD_AXIOMS.iter().enumerate() {
            names.push((*name).to_owned());
            arities.push(*arity);
            index_by_name.insert((*name).to_owned(), AxiomId::from_raw(index));
        }
        Self {
            names,
            arities,
            index_by_name,
        }
    }

    /// Builds a registry from an explicit ordered axiom list.
    ///
    /// Fails if the list is empty, exceeds the available letter pool, repeats
    /// a name, or declares an arity outside `1..=MAX_AXIOM_ARITY`.
    pub fn with_axioms(axioms: &[(&str, usize)]) -> Result<Self, SarError> {
        if axioms.is_empty() {
            return Err(SarError::Vocabulary(ErrorInfo::new(
                "empty-registry",
                "axiom registry requires at least one axiom",
            )));
        }
        if axioms.len() > AXIOM_LETTERS.len() {
            let info = ErrorInfo::new("too-many-axioms", "axiom count exceeds letter pool")
                .with_context("axioms", axioms.len().to_string())
                .with_context("letters", AXIOM_LETTERS.len().to_string());
            return Err(SarError::Vocabulary(info));
        }
        let mut names = Vec::with_capacity(axioms.len());
        let mut arities = Vec::with_capacity(axioms.len());
        let mut index_by_name = BTreeMap::new();
        for (index, (name, arity)) in axioms.iter().enumerate() {
            if *arity == 0 || *arity > MAX_AXIOM_ARITY {
                let info = ErrorInfo::new("axiom-arity-out-of-range", "axiom arity unsupported")
                    .with_context("axiom", *name)
                    .with_context("arity", arity.to_string())
                    .with_context("max_arity", MAX_AXIOM_ARITY.to_string());
                return Err(SarError::Vocabulary(info));
            }
            if index_by_name
                .insert((*name).to_owned(), AxiomId::from_raw(index))
                .is_some()
            {
                let info = ErrorInfo::new("duplicate-axiom", "axiom name repeats in registry")
                    .with_context("axiom", *name);
                return Err(SarError::Vocabulary(info));
            }
            names.push((*name).to_owned());
            arities.push(*arity);
        }
        Ok(Self {
            names,
            arities,
            index_by_name,
        })
    }

    /// Returns the number of registered axioms.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the canonical index for an axiom name.
    pub fn index_of(&self, name: &str) -> Option<AxiomId> {
        self.index_by_name.get(name).copied()
    }

    /// Returns the name stored under the identifier.
    pub fn name(&self, id: AxiomId) -> Option<&str> {
        self.names.get(id.as_raw()).map(String::as_str)
    }

    /// Returns the fixed argument arity of the axiom.
    pub fn arity(&self, id: AxiomId) -> Option<usize> {
        self.arities.get(id.as_raw()).copied()
    }

    /// Returns the single uppercase letter assigned to the axiom.
    pub fn letter(&self, id: AxiomId) -> Option<char> {
        if id.as_raw() < self.names.len() {
            AXIOM_LETTERS.chars().nth(id.as_raw())
        } else {
            None
        }
    }

    /// Resolves an axiom from its assigned letter.
    pub fn by_letter(&self, letter: char) -> Option<AxiomId> {
        let index = AXIOM_LETTERS.find(letter)?;
        if index < self.names.len() {
            Some(AxiomId::from_raw(index))
        } else {
            None
        }
    }
}
