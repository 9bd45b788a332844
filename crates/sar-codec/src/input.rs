use sar_core::{ErrorInfo, ProofState, SarError};
use sar_vocab::{CONDITION_LEXEME, EOS_LEXEME, OBJECTIVE_LEXEME};

use crate::diff::find_diff;

/// Destination the policy input formula is diffed towards.
#[derive(Debug, Clone, Copy)]
pub enum Destination<'a> {
    /// Pre-rendered destination objective string.
    Rendered(&'a str),
    /// Proof state whose first objective is the destination.
    State(&'a ProofState),
}

/// Renders the objective and condition halves of a proof state.
///
/// The objective half joins all objective renderings with the `#` marker; the
/// condition half always starts with `&` and joins any hypothesis renderings
/// with further `&` markers.
pub fn state_input_parts(state: &ProofState) -> Result<(String, String), SarError> {
    let mut objectives = Vec::with_capacity(state.objectives.len());
    for objective in &state.objectives {
        objectives.push(objective.render()?);
    }
    let formula = format!("{}{}", OBJECTIVE_LEXEME, objectives.join(OBJECTIVE_LEXEME));

    let mut condition = CONDITION_LEXEME.to_owned();
    if !state.conditions.is_empty() {
        let mut conditions = Vec::with_capacity(state.conditions.len());
        for hypothesis in &state.conditions {
            conditions.push(hypothesis.render()?);
        }
        condition.push_str(&conditions.join(CONDITION_LEXEME));
    }
    Ok((formula, condition))
}

/// Builds the full policy input formula for a proof state.
///
/// In vanilla mode the rendered objectives pass through literally; otherwise
/// they are replaced by their diff against the destination objective's
/// rendering. The condition half and the `$` terminator follow either way.
pub fn policy_input_formula(
    state: &ProofState,
    destination: &Destination<'_>,
    vanilla: bool,
) -> Result<String, SarError> {
    let (current, condition) = state_input_parts(state)?;
    let mut formula = if vanilla {
        current
    } else {
        let rendered = destination_objective(destination)?;
        find_diff(&current, &rendered)?
    };
    formula.push_str(&condition);
    formula.push_str(EOS_LEXEME);
    Ok(formula)
}

fn destination_objective(destination: &Destination<'_>) -> Result<String, SarError> {
    match destination {
        Destination::Rendered(objective) => Ok(format!("{OBJECTIVE_LEXEME}{objective}")),
        Destination::State(state) => {
            let objective = state.objectives.first().ok_or_else(|| {
                SarError::Diff(ErrorInfo::new(
                    "missing-destination-objective",
                    "destination state has no objective statement",
                ))
            })?;
            Ok(format!("{OBJECTIVE_LEXEME}{}", objective.render()?))
        }
    }
}
