//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the craftplan crate so
//! that library users can pull in the core surface with a single import.

// Ruleset loading and the data model
pub use crate::ruleset::{NamedRecipe, Problem, RecipeRule, ResourceCounts, Ruleset};

// Domain compilation
pub use crate::domain::{
    Decomposition, Domain, DomainCompiler, MethodEntry, MethodKind, OperatorOutcome,
    RecipeOperator, TierTable,
};

// World state and goals
pub use crate::state::{WorldState, goal_tasks};

// Tasks
pub use crate::task::{EntityId, Task, TaskKey};

// Planning
pub use crate::planner::{
    AgendaItem, Plan, PlanStep, Planner, PruneHook, ReorderHook, SearchContext, Solution,
};

// Search guidance
pub use crate::guidance::{GuidanceConfig, SearchGuidance};

// Error types
pub use crate::error::RulesetError;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
