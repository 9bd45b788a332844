use proptest::prelude::*;
use sar_codec::{find_diff, generate_masks, merge_masks, DEFAULT_MASK_SYMBOL};
use sar_core::{EntityId, EntityTable, OpKind, RelationKind, Statement};
use sar_vocab::{formula_from_tokens, tokenize_formula, Vocabulary};

#[derive(Debug, Clone)]
enum Tree {
    Atom(char),
    Unary(OpKind, Box<Tree>),
    Binary(OpKind, Box<Tree>, Box<Tree>),
}

fn tree_strategy() -> impl Strategy<Value = Tree> {
    let leaf = prop::sample::select(vec!['a', 'b', 'c', 'x', 'y', '0', '1']).prop_map(Tree::Atom);
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (
                prop::sample::select(vec![OpKind::Opp, OpKind::Sqr, OpKind::Sqrt, OpKind::Inv]),
                inner.clone()
            )
                .prop_map(|(kind, child)| Tree::Unary(kind, Box::new(child))),
            (
                prop::sample::select(vec![OpKind::Add, OpKind::Sub, OpKind::Mul]),
                inner.clone(),
                inner
            )
                .prop_map(|(kind, lhs, rhs)| Tree::Binary(kind, Box::new(lhs), Box::new(rhs))),
        ]
    })
}

fn relation_strategy() -> impl Strategy<Value = RelationKind> {
    prop::sample::select(vec![
        RelationKind::Equal,
        RelationKind::GreaterOrEqual,
        RelationKind::LessOrEqual,
    ])
}

fn build(tree: &Tree, table: &mut EntityTable) -> EntityId {
    match tree {
        Tree::Atom(name) => table.atom(name.to_string()).unwrap(),
        Tree::Unary(kind, child) => {
            let child = build(child, table);
            table.node(*kind, &[child]).unwrap()
        }
        Tree::Binary(kind, lhs, rhs) => {
            let lhs = build(lhs, table);
            let rhs = build(rhs, table);
            table.node(*kind, &[lhs, rhs]).unwrap()
        }
    }
}

fn build_statement(relation: RelationKind, lhs: &Tree, rhs: &Tree) -> Statement {
    let mut table = EntityTable::new();
    let lhs = build(lhs, &mut table);
    let rhs = build(rhs, &mut table);
    Statement::new(relation, table, lhs, rhs).unwrap()
}

proptest! {
    #[test]
    fn mask_laws_hold_for_random_statements(
        relation in relation_strategy(),
        lhs in tree_strategy(),
        rhs in tree_strategy(),
    ) {
        let statement = build_statement(relation, &lhs, &rhs);
        let rendered = statement.render().unwrap();
        let masks = generate_masks(&statement, DEFAULT_MASK_SYMBOL).unwrap();

        // Every table entry is reachable and masked exactly once.
        prop_assert_eq!(masks.len(), statement.table().len());
        for (id, mask) in masks.iter() {
            prop_assert_eq!(masks.entity_of(mask), Some(id));
            prop_assert_eq!(mask.matches(DEFAULT_MASK_SYMBOL).count(), 1);
            let stripped: String = mask.chars().filter(|c| *c != DEFAULT_MASK_SYMBOL).collect();
            prop_assert_eq!(stripped, rendered.clone());
        }
    }

    #[test]
    fn merge_grows_by_one_pointer_per_mask(
        relation in relation_strategy(),
        lhs in tree_strategy(),
        rhs in tree_strategy(),
        count in 1usize..=3,
    ) {
        let statement = build_statement(relation, &lhs, &rhs);
        let masks = generate_masks(&statement, DEFAULT_MASK_SYMBOL).unwrap();
        let count = count.min(statement.table().len());
        let selected: Vec<&str> = statement
            .table()
            .ids()
            .take(count)
            .map(|id| masks.mask_of(id).unwrap())
            .collect();
        let merged = merge_masks(&selected, DEFAULT_MASK_SYMBOL).unwrap();
        let base = selected[0].chars().count();
        prop_assert_eq!(merged.chars().count(), base + count - 1);
    }

    #[test]
    fn rendered_statements_tokenize_idempotently(
        relation in relation_strategy(),
        lhs in tree_strategy(),
        rhs in tree_strategy(),
    ) {
        let vocabulary = Vocabulary::new().unwrap();
        let statement = build_statement(relation, &lhs, &rhs);
        let rendered = statement.render().unwrap();
        let tokens = tokenize_formula(&vocabulary, &rendered).unwrap();
        let restored = formula_from_tokens(&vocabulary, &tokens).unwrap();
        prop_assert_eq!(&restored, &rendered);
        prop_assert_eq!(tokenize_formula(&vocabulary, &restored).unwrap(), tokens);
    }

    #[test]
    fn self_diff_is_always_the_identity(
        relation in relation_strategy(),
        lhs in tree_strategy(),
        rhs in tree_strategy(),
    ) {
        let statement = build_statement(relation, &lhs, &rhs);
        let rendered = statement.render().unwrap();
        prop_assert_eq!(find_diff(&rendered, &rendered).unwrap(), rendered);
    }
}
