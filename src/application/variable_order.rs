// Variable order resolver - Topological ordering of dashboard variables

use std::collections::HashMap;

use crate::domain::dashboard::Variable;
use crate::domain::error::ValidationError;

#[derive(Clone, Copy)]
enum VisitState {
    InProgress,
    Done,
}

/// Compute the evaluation order of dashboard variables so that every
/// variable appears after all the variables it references.
///
/// Variables with no dependency relation keep their insertion order, so the
/// result is deterministic for a given input slice. Fails when a variable
/// references a name absent from the slice or when the reference graph
/// contains a cycle.
pub fn build_variable_order(variables: &[Variable]) -> Result<Vec<String>, ValidationError> {
    let definitions: HashMap<&str, &Variable> = variables
        .iter()
        .map(|variable| (variable.spec.name.as_str(), variable))
        .collect();

    let mut states: HashMap<&str, VisitState> = HashMap::new();
    let mut order = Vec::with_capacity(variables.len());
    for variable in variables {
        visit(variable, &definitions, &mut states, &mut order)?;
    }
    Ok(order)
}

fn visit<'a>(
    variable: &'a Variable,
    definitions: &HashMap<&str, &'a Variable>,
    states: &mut HashMap<&'a str, VisitState>,
    order: &mut Vec<String>,
) -> Result<(), ValidationError> {
    let name = variable.spec.name.as_str();
    match states.get(name) {
        Some(VisitState::Done) => return Ok(()),
        Some(VisitState::InProgress) => {
            return Err(ValidationError::CyclicDependency {
                variable: name.to_string(),
            });
        }
        None => {}
    }
    states.insert(name, VisitState::InProgress);

    for reference in variable.references() {
        let dependency = definitions.get(reference.as_str()).copied().ok_or_else(|| {
            ValidationError::UnknownReference {
                variable: name.to_string(),
                reference: reference.clone(),
            }
        })?;
        visit(dependency, definitions, states, order)?;
    }

    states.insert(name, VisitState::Done);
    order.push(name.to_string());
    Ok(())
}
