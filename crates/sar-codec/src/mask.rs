use std::collections::BTreeMap;

use sar_core::{EntityId, EntityTable, ErrorInfo, OpKind, SarError, Statement};

/// Pointer symbol used when a single entity position is marked.
pub const DEFAULT_MASK_SYMBOL: char = '~';

/// Bijective entity/mask maps for one statement.
///
/// Rebuilt from scratch on every [`generate_masks`] call; nothing is cached
/// across calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskTable {
    entity_to_mask: BTreeMap<EntityId, String>,
    mask_to_entity: BTreeMap<String, EntityId>,
}

impl MaskTable {
    /// Returns the mask marking the entity's position, if the entity is
    /// reachable in the statement.
    pub fn mask_of(&self, id: EntityId) -> Option<&str> {
        self.entity_to_mask.get(&id).map(String::as_str)
    }

    /// Returns the entity whose position a mask marks.
    pub fn entity_of(&self, mask: &str) -> Option<EntityId> {
        self.mask_to_entity.get(mask).copied()
    }

    /// Returns the number of masked entities.
    pub fn len(&self) -> usize {
        self.entity_to_mask.len()
    }

    /// Returns whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entity_to_mask.is_empty()
    }

    /// Returns an iterator over `(entity, mask)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &str)> {
        self.entity_to_mask
            .iter()
            .map(|(id, mask)| (*id, mask.as_str()))
    }

    fn insert(&mut self, id: EntityId, mask: String) -> Result<(), SarError> {
        if self.entity_to_mask.contains_key(&id) {
            let info = ErrorInfo::new("entity-reused", "entity occupies two tree positions")
                .with_context("id", id.as_raw().to_string())
                .with_hint("insert a fresh table entry per tree position");
            return Err(SarError::Mask(info));
        }
        if let Some(previous) = self.mask_to_entity.insert(mask.clone(), id) {
            let info = ErrorInfo::new("mask-collision", "two entities produced the same mask")
                .with_context("mask", mask)
                .with_context("first", previous.as_raw().to_string())
                .with_context("second", id.as_raw().to_string());
            return Err(SarError::Mask(info));
        }
        self.entity_to_mask.insert(id, mask);
        Ok(())
    }
}

struct WorkItem {
    id: EntityId,
    left: String,
    right: String,
}

/// Computes the contextual mask of every sub-entity reachable in a statement.
///
/// Each mask contains exactly one `symbol` occurrence and, with the symbol
/// removed, reproduces the rendered statement; masks are therefore unique and
/// safe as map keys.
pub fn generate_masks(statement: &Statement, symbol: char) -> Result<MaskTable, SarError> {
    let table = statement.table();
    let operator = statement.relation().render();
    let lhs_flat = table.render(statement.lhs())?;
    let rhs_flat = table.render(statement.rhs())?;

    let mut work = vec![
        WorkItem {
            id: statement.lhs(),
            left: String::new(),
            right: format!("{operator}{rhs_flat}"),
        },
        WorkItem {
            id: statement.rhs(),
            left: format!("{lhs_flat}{operator}"),
            right: String::new(),
        },
    ];

    let mut masks = MaskTable::default();
    while let Some(item) = work.pop() {
        let interior = expand(table, &item, symbol, &mut work)?;
        masks.insert(item.id, format!("{}{}{}", item.left, interior, item.right))?;
    }
    Ok(masks)
}

/// Produces the entity's interior placeholder and queues its children with
/// their extended contexts.
fn expand(
    table: &EntityTable,
    item: &WorkItem,
    symbol: char,
    work: &mut Vec<WorkItem>,
) -> Result<String, SarError> {
    let entity = table.get(item.id)?;
    match entity.kind() {
        OpKind::Add | OpKind::Sub | OpKind::Mul => {
            let op = match entity.kind() {
                OpKind::Add => "+",
                OpKind::Sub => "-",
                _ => "*",
            };
            let first = entity.operands()[0];
            let second = entity.operands()[1];
            let first_flat = table.render(first)?;
            let second_flat = table.render(second)?;
            work.push(WorkItem {
                id: first,
                left: format!("{}(", item.left),
                right: format!("{op}{second_flat}){}", item.right),
            });
            work.push(WorkItem {
                id: second,
                left: format!("{}({first_flat}{op}", item.left),
                right: format!("){}", item.right),
            });
            Ok(format!("({first_flat}{op}{symbol}{second_flat})"))
        }
        OpKind::Opp => {
            let operand = entity.operands()[0];
            let flat = table.render(operand)?;
            work.push(WorkItem {
                id: operand,
                left: format!("{}(-", item.left),
                right: format!("){}", item.right),
            });
            Ok(format!("(-{symbol}{flat})"))
        }
        OpKind::Sqr => {
            let operand = entity.operands()[0];
            let flat = table.render(operand)?;
            work.push(WorkItem {
                id: operand,
                left: format!("{}(", item.left),
                right: format!("^2){}", item.right),
            });
            Ok(format!("({flat}^2{symbol})"))
        }
        OpKind::Sqrt => {
            let operand = entity.operands()[0];
            let flat = table.render(operand)?;
            work.push(WorkItem {
                id: operand,
                left: format!("{}(sqrt", item.left),
                right: format!("){}", item.right),
            });
            Ok(format!("(sqrt{symbol}{flat})"))
        }
        OpKind::Inv => {
            let operand = entity.operands()[0];
            let flat = table.render(operand)?;
            work.push(WorkItem {
                id: operand,
                left: format!("{}(1/", item.left),
                right: format!("){}", item.right),
            });
            Ok(format!("(1/{symbol}{flat})"))
        }
        OpKind::Atom => {
            let flat = table.render(item.id)?;
            Ok(format!("{flat}{symbol}"))
        }
    }
}
