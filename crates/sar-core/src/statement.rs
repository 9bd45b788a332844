use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, EntityTable};
use crate::errors::SarError;

/// Relation kind of a logic statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// Equality.
    Equal,
    /// Greater-or-equal inequality.
    GreaterOrEqual,
    /// Less-or-equal inequality.
    LessOrEqual,
}

impl RelationKind {
    /// Returns the rendered relation operator, trailing space included for
    /// the inequality forms.
    pub fn render(&self) -> &'static str {
        match self {
            RelationKind::Equal => "=",
            RelationKind::GreaterOrEqual => "\\geq ",
            RelationKind::LessOrEqual => "\\leq ",
        }
    }
}

/// A relation over exactly two entities of one owning [`EntityTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    relation: RelationKind,
    table: EntityTable,
    lhs: EntityId,
    rhs: EntityId,
}

impl Statement {
    /// Creates a statement after validating that both operands live in the
    /// provided table.
    pub fn new(
        relation: RelationKind,
        table: EntityTable,
        lhs: EntityId,
        rhs: EntityId,
    ) -> Result<Self, SarError> {
        table.get(lhs)?;
        table.get(rhs)?;
        Ok(Self {
            relation,
            table,
            lhs,
            rhs,
        })
    }

    /// Returns the relation kind.
    pub fn relation(&self) -> RelationKind {
        self.relation
    }

    /// Returns the owning entity table.
    pub fn table(&self) -> &EntityTable {
        &self.table
    }

    /// Returns the left-hand operand identifier.
    pub fn lhs(&self) -> EntityId {
        self.lhs
    }

    /// Returns the right-hand operand identifier.
    pub fn rhs(&self) -> EntityId {
        self.rhs
    }

    /// Renders the canonical flattened string form of the statement.
    pub fn render(&self) -> Result<String, SarError> {
        Ok(format!(
            "{}{}{}",
            self.table.render(self.lhs)?,
            self.relation.render(),
            self.table.render(self.rhs)?
        ))
    }
}

/// Snapshot of a proof search state as seen by the codec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofState {
    /// Target statements the proof process is trying to derive.
    pub objectives: Vec<Statement>,
    /// Hypothesis statements assumed to hold.
    pub conditions: Vec<Statement>,
}
