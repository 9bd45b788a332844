use sar_codec::{ActionCodec, AxiomRef, EntityRef};
use sar_core::{EntityId, EntityTable, RelationKind, SarError, Statement};
use sar_vocab::{AxiomRegistry, Vocabulary};

fn sum_objective() -> Statement {
    let mut table = EntityTable::new();
    let a = table.atom("a").unwrap();
    let b = table.atom("b").unwrap();
    let sum = table.add(a, b).unwrap();
    let c = table.atom("c").unwrap();
    Statement::new(RelationKind::Equal, table, sum, c).unwrap()
}

#[test]
fn encoding_marks_arguments_with_ordered_pointers() {
    let vocabulary = Vocabulary::new().unwrap();
    let registry = AxiomRegistry::standard();
    let codec = ActionCodec::new(&vocabulary, &registry);
    let objective = sum_objective();

    let formula = codec
        .encode(
            &objective,
            &AxiomRef::Name("PrincipleOfEquality".into()),
            &[
                EntityRef::Id(EntityId::from_raw(0)),
                EntityRef::Id(EntityId::from_raw(1)),
            ],
        )
        .unwrap();
    assert_eq!(formula, "@M(a~+b!)=c$");

    // Numeric axiom and entity-table indices encode identically.
    let index = registry.index_of("PrincipleOfEquality").unwrap().as_raw();
    let by_index = codec
        .encode(
            &objective,
            &AxiomRef::Index(index),
            &[EntityRef::Index(0), EntityRef::Index(1)],
        )
        .unwrap();
    assert_eq!(by_index, formula);
}

#[test]
fn encode_then_decode_recovers_the_action() {
    let vocabulary = Vocabulary::new().unwrap();
    let registry = AxiomRegistry::standard();
    let codec = ActionCodec::new(&vocabulary, &registry);
    let objective = sum_objective();

    let formula = codec
        .encode(
            &objective,
            &AxiomRef::Name("PrincipleOfEquality".into()),
            &[EntityRef::Index(0), EntityRef::Index(1)],
        )
        .unwrap();
    let action = codec.decode(&objective, &formula).unwrap().unwrap();
    assert_eq!(registry.name(action.axiom), Some("PrincipleOfEquality"));
    assert_eq!(
        action.entities,
        vec![EntityId::from_raw(0), EntityId::from_raw(1)]
    );

    // Argument order survives the round trip.
    let reversed = codec
        .encode(
            &objective,
            &AxiomRef::Name("PrincipleOfEquality".into()),
            &[EntityRef::Index(1), EntityRef::Index(0)],
        )
        .unwrap();
    let action = codec.decode(&objective, &reversed).unwrap().unwrap();
    assert_eq!(
        action.entities,
        vec![EntityId::from_raw(1), EntityId::from_raw(0)]
    );
}

#[test]
fn indexed_decode_returns_registry_and_table_indices() {
    let vocabulary = Vocabulary::new().unwrap();
    let registry = AxiomRegistry::standard();
    let codec = ActionCodec::new(&vocabulary, &registry);
    let objective = sum_objective();

    let (axiom_index, entity_indices) = codec
        .decode_indexed(&objective, "@M(a~+b!)=c$")
        .unwrap()
        .unwrap();
    assert_eq!(
        axiom_index,
        registry.index_of("PrincipleOfEquality").unwrap().as_raw()
    );
    assert_eq!(entity_indices, vec![0, 1]);
}

#[test]
fn unary_actions_use_a_single_mask() {
    let vocabulary = Vocabulary::new().unwrap();
    let registry = AxiomRegistry::standard();
    let codec = ActionCodec::new(&vocabulary, &registry);
    let objective = sum_objective();

    let formula = codec
        .encode(
            &objective,
            &AxiomRef::Name("AdditionCommutativity".into()),
            &[EntityRef::Index(2)],
        )
        .unwrap();
    assert_eq!(formula, "@A(a+~b)=c$");
    let action = codec.decode(&objective, &formula).unwrap().unwrap();
    assert_eq!(action.entities, vec![EntityId::from_raw(2)]);
}

#[test]
fn final_position_arguments_survive_the_round_trip() {
    let vocabulary = Vocabulary::new().unwrap();
    let registry = AxiomRegistry::standard();
    let codec = ActionCodec::new(&vocabulary, &registry);
    let objective = sum_objective();

    // Second argument is the trailing atom of the rendered statement.
    let formula = codec
        .encode(
            &objective,
            &AxiomRef::Name("PrincipleOfEquality".into()),
            &[EntityRef::Index(0), EntityRef::Index(3)],
        )
        .unwrap();
    assert_eq!(formula, "@M(a~+b)=c!$");
    let action = codec.decode(&objective, &formula).unwrap().unwrap();
    assert_eq!(
        action.entities,
        vec![EntityId::from_raw(0), EntityId::from_raw(3)]
    );
}

#[test]
fn empty_interior_is_a_no_op() {
    let vocabulary = Vocabulary::new().unwrap();
    let registry = AxiomRegistry::standard();
    let codec = ActionCodec::new(&vocabulary, &registry);
    let objective = sum_objective();
    assert_eq!(codec.decode(&objective, "@$").unwrap(), None);
    assert_eq!(codec.decode_indexed(&objective, "@$").unwrap(), None);
}

#[test]
fn malformed_predictions_are_rejected() {
    let vocabulary = Vocabulary::new().unwrap();
    let registry = AxiomRegistry::standard();
    let codec = ActionCodec::new(&vocabulary, &registry);
    let objective = sum_objective();

    for prediction in ["M(a~+b!)=c$", "@M(a~+b!)=c", "", "$@"] {
        let err = codec.decode(&objective, prediction).unwrap_err();
        assert_eq!(err.info().code, "invalid-prediction-format", "{prediction:?}");
    }

    let err = codec.decode(&objective, "@Z(a~+b!)=c$").unwrap_err();
    if let SarError::Action(info) = err {
        assert_eq!(info.code, "unrecognized-axiom-letter");
        assert_eq!(info.context.get("letter").map(String::as_str), Some("Z"));
    } else {
        panic!("unexpected error variant");
    }

    let err = codec.decode(&objective, "@M(a~+x!)=c$").unwrap_err();
    assert_eq!(err.info().code, "unrecognized-entity-mask");
}

#[test]
fn encode_validates_axiom_and_arguments() {
    let vocabulary = Vocabulary::new().unwrap();
    let registry = AxiomRegistry::standard();
    let codec = ActionCodec::new(&vocabulary, &registry);
    let objective = sum_objective();

    let err = codec
        .encode(
            &objective,
            &AxiomRef::Name("NoSuchAxiom".into()),
            &[EntityRef::Index(0)],
        )
        .unwrap_err();
    assert_eq!(err.info().code, "unrecognized-axiom");

    let err = codec
        .encode(
            &objective,
            &AxiomRef::Index(registry.len()),
            &[EntityRef::Index(0)],
        )
        .unwrap_err();
    assert_eq!(err.info().code, "axiom-index-out-of-range");

    let err = codec
        .encode(
            &objective,
            &AxiomRef::Name("PrincipleOfEquality".into()),
            &[EntityRef::Index(0)],
        )
        .unwrap_err();
    assert_eq!(err.info().code, "argument-count-mismatch");

    let err = codec
        .encode(
            &objective,
            &AxiomRef::Name("AdditionCommutativity".into()),
            &[EntityRef::Index(99)],
        )
        .unwrap_err();
    assert_eq!(err.info().code, "entity-out-of-range");
}
