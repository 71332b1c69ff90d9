use crate::ruleset::NamedRecipe;
use crate::state::WorldState;
use crate::task::Task;
use std::sync::Arc;

/// The outcome of asking a method to decompose a task.
///
/// `Subtasks(vec![])` means the task is already satisfied and needs no
/// work; `NotApplicable` means this method cannot handle the task in the
/// current state and the planner should try the next candidate. The two
/// must never be conflated.
#[derive(Debug, Clone, PartialEq)]
pub enum Decomposition {
    Subtasks(Vec<Task>),
    NotApplicable,
}

/// Which decomposition a method entry performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// For `HaveEnough`: succeed with no subtasks iff the quantity is
    /// already met, otherwise not-applicable.
    CheckEnough,
    /// For `HaveEnough`: unconditionally produce one batch, then re-check.
    ProduceEnough,
    /// For `Produce`: dispatch to the item-specific production task.
    Dispatch,
    /// For `ProduceItem`: acquire the recipe's tools, then its
    /// consumables, then invoke the recipe operator.
    RecipeSteps,
}

/// One registered decomposition method, tagged with the recipe it was
/// generated from when there is one.
///
/// The source recipe rides alongside the method rather than being hidden
/// inside it so that the search guidance can inspect rule data (required
/// tools, in particular) without decomposing anything.
#[derive(Debug, Clone)]
pub struct MethodEntry {
    pub kind: MethodKind,
    pub recipe: Option<Arc<NamedRecipe>>,
}

impl MethodEntry {
    pub fn generic(kind: MethodKind) -> Self {
        Self { kind, recipe: None }
    }

    pub fn from_recipe(recipe: Arc<NamedRecipe>) -> Self {
        Self {
            kind: MethodKind::RecipeSteps,
            recipe: Some(recipe),
        }
    }

    /// Decomposes `task` against `state`. A task of the wrong shape for
    /// this method's kind is not-applicable; the registry never produces
    /// such a pairing.
    pub fn decompose(&self, state: &WorldState, task: &Task) -> Decomposition {
        match (self.kind, task) {
            (
                MethodKind::CheckEnough,
                Task::HaveEnough {
                    entity,
                    item,
                    amount,
                },
            ) => {
                if state.quantity(item, entity) >= *amount {
                    Decomposition::Subtasks(Vec::new())
                } else {
                    Decomposition::NotApplicable
                }
            }
            (
                MethodKind::ProduceEnough,
                Task::HaveEnough {
                    entity,
                    item,
                    amount,
                },
            ) => Decomposition::Subtasks(vec![
                Task::Produce {
                    entity: entity.clone(),
                    item: item.clone(),
                },
                Task::HaveEnough {
                    entity: entity.clone(),
                    item: item.clone(),
                    amount: *amount,
                },
            ]),
            (MethodKind::Dispatch, Task::Produce { entity, item }) => {
                Decomposition::Subtasks(vec![Task::ProduceItem {
                    entity: entity.clone(),
                    item: item.clone(),
                }])
            }
            (MethodKind::RecipeSteps, Task::ProduceItem { entity, .. }) => {
                match &self.recipe {
                    Some(recipe) => Decomposition::Subtasks(recipe_subtasks(recipe, entity)),
                    None => Decomposition::NotApplicable,
                }
            }
            _ => Decomposition::NotApplicable,
        }
    }
}

/// The subtask list for one recipe: acquire each required tool, acquire
/// each consumable, then invoke the operator. Tools come before
/// consumables, and both preserve the ruleset's declaration order.
fn recipe_subtasks(recipe: &NamedRecipe, entity: &str) -> Vec<Task> {
    let rule = &recipe.rule;
    let mut subtasks = Vec::with_capacity(rule.requires.len() + rule.consumes.len() + 1);
    for (tool, amount) in &rule.requires {
        subtasks.push(Task::HaveEnough {
            entity: entity.to_string(),
            item: tool.clone(),
            amount: *amount,
        });
    }
    for (item, amount) in &rule.consumes {
        subtasks.push(Task::HaveEnough {
            entity: entity.to_string(),
            item: item.clone(),
            amount: *amount,
        });
    }
    subtasks.push(Task::ApplyRecipe {
        entity: entity.to_string(),
        recipe: recipe.name.clone(),
    });
    subtasks
}
