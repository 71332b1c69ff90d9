use crate::ruleset::Ruleset;
use crate::task::{EntityId, Task};
use ahash::AHashMap;

/// The world state during planning: per-entity resource quantities and a
/// per-entity remaining time budget.
///
/// Resources are resolved by a plain two-level key lookup, resource name
/// first and entity id second. Quantities and time are unsigned, so they
/// can never go negative; operators check their preconditions before
/// touching anything. A resource or entity that was never written reads
/// as quantity 0.
///
/// The planner owns branch isolation: it clones the state when it commits
/// to a decomposition branch, so an operator only ever sees the state for
/// the duration of a single invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldState {
    resources: AHashMap<String, AHashMap<EntityId, u64>>,
    time: AHashMap<EntityId, u64>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the initial state for one entity from a ruleset: every
    /// declared item and tool at quantity 0, overridden by the problem's
    /// initial inventory, and the problem's time budget.
    pub fn initial(ruleset: &Ruleset, entity: &str) -> Self {
        let mut state = Self::new();
        state.set_time(entity, ruleset.problem.time);
        for name in ruleset.items.iter().chain(&ruleset.tools) {
            state.set_quantity(name, entity, 0);
        }
        for (name, quantity) in &ruleset.problem.initial {
            state.set_quantity(name, entity, *quantity);
        }
        state
    }

    pub fn quantity(&self, resource: &str, entity: &str) -> u64 {
        self.resources
            .get(resource)
            .and_then(|per_entity| per_entity.get(entity))
            .copied()
            .unwrap_or(0)
    }

    pub fn set_quantity(&mut self, resource: &str, entity: &str, quantity: u64) {
        self.resources
            .entry(resource.to_string())
            .or_default()
            .insert(entity.to_string(), quantity);
    }

    /// Adds `amount` to a resource, saturating at `u64::MAX`.
    pub fn add(&mut self, resource: &str, entity: &str, amount: u64) {
        let current = self.quantity(resource, entity);
        self.set_quantity(resource, entity, current.saturating_add(amount));
    }

    /// Removes `amount` from a resource. Returns `false` and leaves the
    /// state untouched when the quantity is insufficient.
    #[must_use]
    pub fn remove(&mut self, resource: &str, entity: &str, amount: u64) -> bool {
        match self.quantity(resource, entity).checked_sub(amount) {
            Some(remaining) => {
                self.set_quantity(resource, entity, remaining);
                true
            }
            None => false,
        }
    }

    pub fn time_left(&self, entity: &str) -> u64 {
        self.time.get(entity).copied().unwrap_or(0)
    }

    pub fn set_time(&mut self, entity: &str, time: u64) {
        self.time.insert(entity.to_string(), time);
    }

    /// Spends part of the entity's time budget. Returns `false` and leaves
    /// the budget untouched when it is insufficient.
    #[must_use]
    pub fn spend_time(&mut self, entity: &str, amount: u64) -> bool {
        match self.time_left(entity).checked_sub(amount) {
            Some(remaining) => {
                self.time.insert(entity.to_string(), remaining);
                true
            }
            None => false,
        }
    }

    /// Iterates over all known resource names.
    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }
}

/// Builds the top-level goal task list for one entity: one `HaveEnough`
/// task per goal entry, in ruleset order.
pub fn goal_tasks(ruleset: &Ruleset, entity: &str) -> Vec<Task> {
    ruleset
        .problem
        .goal
        .iter()
        .map(|(item, amount)| Task::HaveEnough {
            entity: entity.to_string(),
            item: item.clone(),
            amount: *amount,
        })
        .collect()
}
