use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SarError};

/// Identifier for an entity within an [`EntityTable`].
///
/// Identity is positional: two structurally equal entities inserted at
/// different table slots are distinct, which is what makes ids safe keys for
/// mask tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(usize);

impl EntityId {
    /// Creates an identifier from its raw table index.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw table index of the identifier.
    pub fn as_raw(&self) -> usize {
        self.0
    }
}

/// Operation kind of an expression-tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OpKind {
    /// Binary addition.
    Add,
    /// Binary subtraction.
    Sub,
    /// Binary multiplication.
    Mul,
    /// Unary negation.
    Opp,
    /// Unary square.
    Sqr,
    /// Unary square root.
    Sqrt,
    /// Unary multiplicative inverse.
    Inv,
    /// Leaf symbol (variable or numeral).
    Atom,
}

impl OpKind {
    /// Number of operands the kind requires.
    pub fn arity(&self) -> usize {
        match self {
            OpKind::Add | OpKind::Sub | OpKind::Mul => 2,
            OpKind::Opp | OpKind::Sqr | OpKind::Sqrt | OpKind::Inv => 1,
            OpKind::Atom => 0,
        }
    }
}

/// Node of a symbolic expression tree.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    kind: OpKind,
    operands: Vec<EntityId>,
    atom: Option<String>,
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("kind", &self.kind)
            .field("operands", &self.operands)
            .field("atom", &self.atom)
            .finish()
    }
}

impl Entity {
    /// Returns the operation kind of the node.
    pub fn kind(&self) -> OpKind {
        self.kind
    }

    /// Returns the ordered operand identifiers.
    pub fn operands(&self) -> &[EntityId] {
        &self.operands
    }

    /// Returns the atom name for `Atom` nodes.
    pub fn atom(&self) -> Option<&str> {
        self.atom.as_deref()
    }
}

/// Append-only arena of entities owned by one statement.
///
/// The table index of an entity is its [`EntityId`], so the table doubles as
/// the objective-scoped index lookup the action codec resolves numeric
/// arguments through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTable {
    entities: Vec<Entity>,
}

impl EntityTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entities stored.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns an iterator over all entity identifiers in insertion order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = EntityId> + '_ {
        (0..self.entities.len()).map(EntityId::from_raw)
    }

    /// Returns the entity stored under the identifier.
    pub fn get(&self, id: EntityId) -> Result<&Entity, SarError> {
        self.entities.get(id.as_raw()).ok_or_else(|| {
            SarError::Entity(
                ErrorInfo::new("entity-out-of-range", "identifier outside the entity table")
                    .with_context("id", id.as_raw().to_string())
                    .with_context("table_len", self.entities.len().to_string()),
            )
        })
    }

    /// Inserts a leaf symbol and returns its identifier.
    pub fn atom(&mut self, name: impl Into<String>) -> Result<EntityId, SarError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SarError::Entity(ErrorInfo::new(
                "empty-atom-name",
                "atom entities require a non-empty name",
            )));
        }
        Ok(self.push(Entity {
            kind: OpKind::Atom,
            operands: Vec::new(),
            atom: Some(name),
        }))
    }

    /// Inserts an operator node over existing entities and returns its identifier.
    pub fn node(&mut self, kind: OpKind, operands: &[EntityId]) -> Result<EntityId, SarError> {
        if kind == OpKind::Atom {
            return Err(SarError::Entity(ErrorInfo::new(
                "atom-via-node",
                "leaf entities must be inserted through `atom`",
            )));
        }
        if operands.len() != kind.arity() {
            let info = ErrorInfo::new("operand-arity-mismatch", "wrong operand count for kind")
                .with_context("kind", format!("{kind:?}"))
                .with_context("expected", kind.arity().to_string())
                .with_context("provided", operands.len().to_string());
            return Err(SarError::Entity(info));
        }
        for &operand in operands {
            self.get(operand)?;
        }
        Ok(self.push(Entity {
            kind,
            operands: operands.to_vec(),
            atom: None,
        }))
    }

    /// Inserts an addition node.
    pub fn add(&mut self, lhs: EntityId, rhs: EntityId) -> Result<EntityId, SarError> {
        self.node(OpKind::Add, &[lhs, rhs])
    }

    /// Inserts a subtraction node.
    pub fn sub(&mut self, lhs: EntityId, rhs: EntityId) -> Result<EntityId, SarError> {
        self.node(OpKind::Sub, &[lhs, rhs])
    }

    /// Inserts a multiplication node.
    pub fn mul(&mut self, lhs: EntityId, rhs: EntityId) -> Result<EntityId, SarError> {
        self.node(OpKind::Mul, &[lhs, rhs])
    }

    /// Inserts a negation node.
    pub fn opp(&mut self, operand: EntityId) -> Result<EntityId, SarError> {
        self.node(OpKind::Opp, &[operand])
    }

    /// Inserts a square node.
    pub fn sqr(&mut self, operand: EntityId) -> Result<EntityId, SarError> {
        self.node(OpKind::Sqr, &[operand])
    }

    /// Inserts a square-root node.
    pub fn sqrt(&mut self, operand: EntityId) -> Result<EntityId, SarError> {
        self.node(OpKind::Sqrt, &[operand])
    }

    /// Inserts a multiplicative-inverse node.
    pub fn inv(&mut self, operand: EntityId) -> Result<EntityId, SarError> {
        self.node(OpKind::Inv, &[operand])
    }

    /// Renders the canonical flattened string form of an entity.
    ///
    /// Atoms render as their name; binary nodes as `(<lhs><op><rhs>)`;
    /// unary nodes as `(-x)`, `(x^2)`, `(sqrtx)` and `(1/x)` respectively.
    pub fn render(&self, id: EntityId) -> Result<String, SarError> {
        let entity = self.get(id)?;
        match entity.kind {
            OpKind::Atom => match &entity.atom {
                Some(name) => Ok(name.clone()),
                None => Err(SarError::Entity(
                    ErrorInfo::new("atom-name-missing", "atom entity carries no name")
                        .with_context("id", id.as_raw().to_string()),
                )),
            },
            OpKind::Add => self.render_binary(entity, "+"),
            OpKind::Sub => self.render_binary(entity, "-"),
            OpKind::Mul => self.render_binary(entity, "*"),
            OpKind::Opp => Ok(format!("(-{})", self.render(entity.operands[0])?)),
            OpKind::Sqr => Ok(format!("({}^2)", self.render(entity.operands[0])?)),
            OpKind::Sqrt => Ok(format!("(sqrt{})", self.render(entity.operands[0])?)),
            OpKind::Inv => Ok(format!("(1/{})", self.render(entity.operands[0])?)),
        }
    }

    fn render_binary(&self, entity: &Entity, op: &str) -> Result<String, SarError> {
        let lhs = self.render(entity.operands[0])?;
        let rhs = self.render(entity.operands[1])?;
        Ok(format!("({lhs}{op}{rhs})"))
    }

    fn push(&mut self, entity: Entity) -> EntityId {
        let id = EntityId::from_raw(self.entities.len());
        self.entities.push(entity);
        id
    }
}
