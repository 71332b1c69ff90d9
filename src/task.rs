use std::fmt;

/// Identifier for the entity (e.g. an agent) whose inventory and time
/// budget a task refers to.
pub type EntityId = String;

/// A task in the decomposition hierarchy.
///
/// The first three variants are compound tasks resolved through the
/// domain's method registry; `ApplyRecipe` is the single primitive task
/// kind, resolved through the operator registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Task {
    /// "Ensure entity holds at least `amount` of `item`."
    HaveEnough {
        entity: EntityId,
        item: String,
        amount: u64,
    },
    /// "Produce one batch of `item`, by whatever recipe." Dispatches to
    /// the item-specific production task.
    Produce { entity: EntityId, item: String },
    /// "Produce one batch of `item`" with the candidate recipes for that
    /// specific item. This is the task kind the search guidance watches.
    ProduceItem { entity: EntityId, item: String },
    /// Invoke the primitive operator generated from `recipe`.
    ApplyRecipe { entity: EntityId, recipe: String },
}

/// Registry key for a task: which method list resolves it.
///
/// `HaveEnough` and `Produce` share one generic method list each across
/// all items; `ProduceItem` has one list per distinct produced item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskKey {
    HaveEnough,
    Produce,
    ProduceItem(String),
}

impl Task {
    /// True for tasks resolved by an operator rather than by methods.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Task::ApplyRecipe { .. })
    }

    /// The method-registry key for a compound task, `None` for primitives.
    pub fn key(&self) -> Option<TaskKey> {
        match self {
            Task::HaveEnough { .. } => Some(TaskKey::HaveEnough),
            Task::Produce { .. } => Some(TaskKey::Produce),
            Task::ProduceItem { item, .. } => Some(TaskKey::ProduceItem(item.clone())),
            Task::ApplyRecipe { .. } => None,
        }
    }

    pub fn entity(&self) -> &str {
        match self {
            Task::HaveEnough { entity, .. }
            | Task::Produce { entity, .. }
            | Task::ProduceItem { entity, .. }
            | Task::ApplyRecipe { entity, .. } => entity,
        }
    }

    /// The item a `ProduceItem` task produces. `None` for every other
    /// task kind; used by cycle detection on the calling stack.
    pub fn production_item(&self) -> Option<&str> {
        match self {
            Task::ProduceItem { item, .. } => Some(item),
            _ => None,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::HaveEnough {
                entity,
                item,
                amount,
            } => write!(f, "have_enough({}, {}, {})", entity, item, amount),
            Task::Produce { entity, item } => write!(f, "produce({}, {})", entity, item),
            Task::ProduceItem { entity, item } => write!(f, "produce_{}({})", item, entity),
            Task::ApplyRecipe { entity, recipe } => {
                write!(f, "op_{}({})", recipe.replace([' ', '-'], "_"), entity)
            }
        }
    }
}
