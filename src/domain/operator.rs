use crate::ruleset::NamedRecipe;
use crate::state::WorldState;
use std::sync::Arc;

/// The outcome of attempting a primitive operator.
///
/// `NotApplicable` is a routine result consulted many times per search
/// branch; it tells the planner to backtrack, and must never be read as
/// success.
#[derive(Debug, Clone, PartialEq)]
pub enum OperatorOutcome {
    /// All preconditions held; the returned state carries every effect.
    Applied(WorldState),
    /// A precondition failed; the input state was not touched.
    NotApplicable,
}

/// The primitive operator generated from one recipe.
///
/// Application is all-or-nothing: every precondition (time budget,
/// required tools present, consumables available) is checked against the
/// input state before any effect is committed, so a failed application
/// leaves no partial mutation behind.
#[derive(Debug, Clone)]
pub struct RecipeOperator {
    recipe: Arc<NamedRecipe>,
}

impl RecipeOperator {
    pub fn new(recipe: Arc<NamedRecipe>) -> Self {
        Self { recipe }
    }

    pub fn recipe(&self) -> &NamedRecipe {
        &self.recipe
    }

    /// Attempts one application of the recipe for `entity`.
    pub fn apply(&self, state: &WorldState, entity: &str) -> OperatorOutcome {
        let rule = &self.recipe.rule;

        if state.time_left(entity) < rule.time {
            return OperatorOutcome::NotApplicable;
        }
        for (tool, amount) in &rule.requires {
            if state.quantity(tool, entity) < *amount {
                return OperatorOutcome::NotApplicable;
            }
        }
        for (item, amount) in &rule.consumes {
            if state.quantity(item, entity) < *amount {
                return OperatorOutcome::NotApplicable;
            }
        }

        let mut next = state.clone();
        for (item, amount) in &rule.consumes {
            // Checked above; cannot fail on the cloned state.
            let removed = next.remove(item, entity, *amount);
            debug_assert!(removed);
        }
        for (item, amount) in &rule.produces {
            next.add(item, entity, *amount);
        }
        let spent = next.spend_time(entity, rule.time);
        debug_assert!(spent);

        OperatorOutcome::Applied(next)
    }
}
