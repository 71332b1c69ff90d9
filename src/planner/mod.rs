//! Generic depth-first HTN decomposition with backtracking.
//!
//! The planner knows nothing about recipes beyond what the domain
//! registries expose. Two optional hooks steer the search: a prune
//! predicate consulted before every task expansion, and a reorder hook
//! consulted whenever a compound task has more than one candidate method.

use crate::domain::{Decomposition, Domain, MethodEntry, OperatorOutcome};
use crate::state::WorldState;
use crate::task::{EntityId, Task};
use std::borrow::Cow;
use std::fmt;

/// One applied operator in a finished plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub recipe: String,
    pub entity: EntityId,
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op_{}({})", self.recipe.replace([' ', '-'], "_"), self.entity)
    }
}

/// An ordered sequence of operator applications.
pub type Plan = Vec<PlanStep>;

/// A finished plan together with the state it leaves behind.
#[derive(Debug, Clone)]
pub struct Solution {
    pub plan: Plan,
    pub final_state: WorldState,
}

/// An entry in the planner's work agenda.
///
/// `Exit` marks the end of a decomposed task's subtasks: reaching it pops
/// that task off the calling stack, so the stack always holds exactly the
/// chain of expansions still in progress.
#[derive(Debug, Clone)]
pub enum AgendaItem {
    Pending(Task),
    Exit,
}

/// The search context handed to the hooks at each expansion.
pub struct SearchContext<'a> {
    pub state: &'a WorldState,
    pub task: &'a Task,
    /// The rest of the agenda after the current task.
    pub remaining: &'a [AgendaItem],
    pub plan: &'a [PlanStep],
    pub depth: usize,
    /// Tasks currently under expansion on this branch, outermost first.
    pub calling_stack: &'a [Task],
}

/// Decides whether the branch rooted at the current task is abandoned.
pub trait PruneHook {
    fn should_prune(&self, ctx: &SearchContext<'_>) -> bool;
}

/// Re-ranks the candidate methods for the current task.
///
/// Returning `None` declines, keeping the domain's static order. A
/// returned list must be a permutation of `candidates`: same methods,
/// same length, nothing added, removed, or duplicated.
pub trait ReorderHook {
    fn reorder(
        &self,
        ctx: &SearchContext<'_>,
        candidates: &[MethodEntry],
    ) -> Option<Vec<MethodEntry>>;
}

/// Depth-first decomposition planner over a compiled [`Domain`].
pub struct Planner {
    domain: Domain,
    prune: Option<Box<dyn PruneHook>>,
    reorder: Option<Box<dyn ReorderHook>>,
}

impl Planner {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            prune: None,
            reorder: None,
        }
    }

    /// Installs the single global prune predicate.
    pub fn with_prune_hook(mut self, hook: impl PruneHook + 'static) -> Self {
        self.prune = Some(Box::new(hook));
        self
    }

    /// Installs the single global reorder hook.
    pub fn with_reorder_hook(mut self, hook: impl ReorderHook + 'static) -> Self {
        self.reorder = Some(Box::new(hook));
        self
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Computes a method's subtask list without committing to it. Hooks
    /// use this to inspect a candidate's prerequisites.
    pub fn preview_subtasks(
        entry: &MethodEntry,
        state: &WorldState,
        task: &Task,
    ) -> Decomposition {
        entry.decompose(state, task)
    }

    /// Searches for a plan achieving `goals` from `initial`.
    ///
    /// Returns `None` when every branch is exhausted or pruned; that is a
    /// normal, reportable outcome, not an error.
    pub fn plan(&self, initial: WorldState, goals: Vec<Task>, verbosity: u8) -> Option<Plan> {
        self.solve(initial, goals, verbosity)
            .map(|solution| solution.plan)
    }

    /// Like [`Planner::plan`], but also returns the final state.
    pub fn solve(
        &self,
        initial: WorldState,
        goals: Vec<Task>,
        verbosity: u8,
    ) -> Option<Solution> {
        if verbosity >= 1 {
            println!("planner: {} goal task(s)", goals.len());
        }
        let agenda: Vec<AgendaItem> = goals.into_iter().map(AgendaItem::Pending).collect();
        let mut calling_stack = Vec::new();
        let found = self.seek(initial, &agenda, Vec::new(), 0, &mut calling_stack, verbosity);
        match found {
            Some((final_state, plan)) => {
                if verbosity >= 1 {
                    println!("planner: plan found with {} step(s)", plan.len());
                }
                Some(Solution { plan, final_state })
            }
            None => {
                if verbosity >= 1 {
                    println!("planner: search exhausted, no plan");
                }
                None
            }
        }
    }

    fn seek(
        &self,
        state: WorldState,
        agenda: &[AgendaItem],
        plan: Vec<PlanStep>,
        depth: usize,
        calling_stack: &mut Vec<Task>,
        verbosity: u8,
    ) -> Option<(WorldState, Vec<PlanStep>)> {
        let Some((item, rest)) = agenda.split_first() else {
            return Some((state, plan));
        };

        let task = match item {
            AgendaItem::Exit => {
                // The subtasks of the innermost expansion are done; its
                // frame leaves the stack. Restored on backtrack so
                // sibling branches see a consistent stack.
                let frame = calling_stack.pop();
                let found = self.seek(state, rest, plan, depth + 1, calling_stack, verbosity);
                if found.is_none() {
                    calling_stack.extend(frame);
                }
                return found;
            }
            AgendaItem::Pending(task) => task,
        };

        if verbosity >= 2 {
            println!("planner: depth {:>3} expanding {}", depth, task);
        }

        if let Some(prune) = &self.prune {
            let ctx = SearchContext {
                state: &state,
                task,
                remaining: rest,
                plan: &plan,
                depth,
                calling_stack,
            };
            if prune.should_prune(&ctx) {
                if verbosity >= 2 {
                    println!("planner: depth {:>3} pruned   {}", depth, task);
                }
                return None;
            }
        }

        if let Task::ApplyRecipe { entity, recipe } = task {
            let operator = self.domain.operator(recipe)?;
            return match operator.apply(&state, entity) {
                OperatorOutcome::Applied(next) => {
                    if verbosity >= 3 {
                        println!(
                            "planner: applied {} (time left {})",
                            task,
                            next.time_left(entity)
                        );
                    }
                    let mut plan = plan;
                    plan.push(PlanStep {
                        recipe: recipe.clone(),
                        entity: entity.clone(),
                    });
                    self.seek(next, rest, plan, depth + 1, calling_stack, verbosity)
                }
                OperatorOutcome::NotApplicable => None,
            };
        }

        let key = task.key()?;
        let registered = self.domain.methods_for(&key)?;

        let candidates: Cow<'_, [MethodEntry]> = match &self.reorder {
            Some(hook) if registered.len() > 1 => {
                let ctx = SearchContext {
                    state: &state,
                    task,
                    remaining: rest,
                    plan: &plan,
                    depth,
                    calling_stack,
                };
                match hook.reorder(&ctx, registered) {
                    Some(reordered) => {
                        debug_assert_eq!(reordered.len(), registered.len());
                        Cow::Owned(reordered)
                    }
                    None => Cow::Borrowed(registered),
                }
            }
            _ => Cow::Borrowed(registered),
        };

        for entry in candidates.iter() {
            let Decomposition::Subtasks(subtasks) = entry.decompose(&state, task) else {
                continue;
            };
            let mut next_agenda = Vec::with_capacity(subtasks.len() + 1 + rest.len());
            next_agenda.extend(subtasks.into_iter().map(AgendaItem::Pending));
            next_agenda.push(AgendaItem::Exit);
            next_agenda.extend_from_slice(rest);

            calling_stack.push(task.clone());
            if let Some(found) = self.seek(
                state.clone(),
                &next_agenda,
                plan.clone(),
                depth + 1,
                calling_stack,
                verbosity,
            ) {
                return Some(found);
            }
            calling_stack.pop();
        }
        None
    }
}
