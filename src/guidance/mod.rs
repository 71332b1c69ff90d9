//! Runtime search guidance: the prune predicate that cuts circular or
//! runaway production chains, and the dynamic reorder that re-ranks a
//! product's candidate recipes by how ready they are in the live state.

use crate::domain::{Decomposition, Domain, MethodEntry};
use crate::planner::{Planner, PruneHook, ReorderHook, SearchContext};
use crate::task::Task;
use ahash::AHashSet;

/// Reward per acquisition subtask already satisfied in the current state.
const SATISFIED_REWARD: i64 = -10;
/// Penalty per acquisition subtask that still needs production.
const UNSATISFIED_PENALTY: i64 = 1;

/// Tunable guidance thresholds.
///
/// Both defaults are empirical: three nested productions of the same item
/// is permissive enough not to cut legitimate deep crafting chains, and
/// depth 400 is a plain safety bound on the recursion.
#[derive(Debug, Clone, Copy)]
pub struct GuidanceConfig {
    /// Abandon a branch once the same item is under production this many
    /// times on the calling stack.
    pub repetition_limit: usize,
    /// Abandon any branch deeper than this.
    pub depth_limit: usize,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            repetition_limit: 3,
            depth_limit: 400,
        }
    }
}

/// Context-aware guidance consulted by the planner during search.
///
/// Install the same value as both hooks:
///
/// ```rust,no_run
/// # use craftplan::prelude::*;
/// # fn demo(domain: Domain) {
/// let guidance = SearchGuidance::for_domain(&domain);
/// let planner = Planner::new(domain)
///     .with_prune_hook(guidance.clone())
///     .with_reorder_hook(guidance);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SearchGuidance {
    tools: AHashSet<String>,
    config: GuidanceConfig,
}

impl SearchGuidance {
    pub fn new(tools: AHashSet<String>, config: GuidanceConfig) -> Self {
        Self { tools, config }
    }

    /// Guidance for a compiled domain, with default thresholds.
    pub fn for_domain(domain: &Domain) -> Self {
        Self::new(domain.tools().clone(), GuidanceConfig::default())
    }

    pub fn with_config(mut self, config: GuidanceConfig) -> Self {
        self.config = config;
        self
    }

    /// How many times `item` is currently under production on the stack.
    fn production_count(calling_stack: &[Task], item: &str) -> usize {
        calling_stack
            .iter()
            .filter(|task| task.production_item() == Some(item))
            .count()
    }

    /// Tools whose production is active somewhere on the calling stack.
    /// A candidate requiring one of these would need the tool to exist
    /// while it is itself mid-production, which is a dependency cycle.
    fn tools_in_production<'a>(&self, calling_stack: &'a [Task]) -> AHashSet<&'a str> {
        calling_stack
            .iter()
            .filter_map(Task::production_item)
            .filter(|item| self.tools.contains(*item))
            .collect()
    }

    fn requires_tool_in_production(
        entry: &MethodEntry,
        in_production: &AHashSet<&str>,
    ) -> bool {
        entry.recipe.as_ref().is_some_and(|recipe| {
            recipe
                .rule
                .requires
                .iter()
                .any(|(tool, _)| in_production.contains(tool.as_str()))
        })
    }

    /// Readiness score for one candidate: lower when more of its
    /// acquisition subtasks are already satisfied. `None` when the
    /// candidate cannot be previewed at all.
    fn readiness_score(&self, ctx: &SearchContext<'_>, entry: &MethodEntry) -> Option<i64> {
        let Decomposition::Subtasks(subtasks) =
            Planner::preview_subtasks(entry, ctx.state, ctx.task)
        else {
            return None;
        };
        let mut score = 0;
        for subtask in subtasks {
            if let Task::HaveEnough {
                entity,
                item,
                amount,
            } = subtask
            {
                if ctx.state.quantity(&item, &entity) >= amount {
                    score += SATISFIED_REWARD;
                } else {
                    score += UNSATISFIED_PENALTY;
                }
            }
        }
        Some(score)
    }
}

impl PruneHook for SearchGuidance {
    fn should_prune(&self, ctx: &SearchContext<'_>) -> bool {
        if let Some(item) = ctx.task.production_item() {
            if Self::production_count(ctx.calling_stack, item) >= self.config.repetition_limit {
                return true;
            }
        }
        ctx.depth > self.config.depth_limit
    }
}

impl ReorderHook for SearchGuidance {
    /// Re-ranks the candidate recipes for a `ProduceItem` task.
    ///
    /// Candidates requiring a tool that is itself mid-production are
    /// cycle-risks: they are demoted behind every viable candidate, in
    /// their original relative order, rather than removed, so the result
    /// is always a permutation of the input. Viable candidates sort
    /// ascending by readiness score (stable, so ties keep the static
    /// order). When every candidate is a cycle-risk the result collapses
    /// to the original order; the prune predicate, not this hook, is the
    /// backstop against runaway recursion.
    fn reorder(
        &self,
        ctx: &SearchContext<'_>,
        candidates: &[MethodEntry],
    ) -> Option<Vec<MethodEntry>> {
        if ctx.task.production_item().is_none() {
            return None;
        }

        let in_production = self.tools_in_production(ctx.calling_stack);

        let mut viable: Vec<(i64, MethodEntry)> = Vec::new();
        let mut demoted: Vec<MethodEntry> = Vec::new();
        for entry in candidates {
            if Self::requires_tool_in_production(entry, &in_production) {
                demoted.push(entry.clone());
                continue;
            }
            match self.readiness_score(ctx, entry) {
                Some(score) => viable.push((score, entry.clone())),
                None => demoted.push(entry.clone()),
            }
        }

        viable.sort_by_key(|(score, _)| *score);
        let mut reordered: Vec<MethodEntry> =
            viable.into_iter().map(|(_, entry)| entry).collect();
        reordered.extend(demoted);
        Some(reordered)
    }
}
