//! # Craftplan - Crafting-Ruleset HTN Compiler and Planner
//!
//! **Craftplan** compiles a declarative crafting ruleset (items, tools,
//! time-and-resource-costed recipes, an initial inventory, and a goal
//! inventory) into a Hierarchical Task Network domain, and supplies the
//! search guidance that makes planning over that domain tractable:
//! circular tool-dependency detection, recursion and repetition bounds,
//! and contextual re-ranking of candidate recipes.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Parse a ruleset JSON file into a [`ruleset::Ruleset`].
//!     Malformed rulesets (a recipe without `Produces`, references to
//!     undeclared resources) fail here; nothing is registered.
//! 2.  **Compile**: [`domain::DomainCompiler`] turns the ruleset into a
//!     [`domain::Domain`]: a method registry (one dispatcher per produced
//!     item, candidate recipes statically ordered against circular tool
//!     dependencies) and an operator registry (one atomic primitive per
//!     recipe).
//! 3.  **Guide**: [`guidance::SearchGuidance`] plugs into the planner as
//!     its prune predicate and dynamic reorder hook.
//! 4.  **Plan**: [`planner::Planner`] runs depth-first decomposition with
//!     backtracking and returns an ordered operator sequence, or `None`
//!     when the search space is exhausted.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use craftplan::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let ruleset = Ruleset::from_file("crafting.json")?;
//!
//!     let state = WorldState::initial(&ruleset, "agent");
//!     let goals = goal_tasks(&ruleset, "agent");
//!
//!     let domain = DomainCompiler::new(ruleset).compile()?;
//!     let guidance = SearchGuidance::for_domain(&domain);
//!     let planner = Planner::new(domain)
//!         .with_prune_hook(guidance.clone())
//!         .with_reorder_hook(guidance);
//!
//!     match planner.plan(state, goals, 1) {
//!         Some(plan) => {
//!             for step in &plan {
//!                 println!("{}", step);
//!             }
//!         }
//!         None => println!("no plan found"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod error;
pub mod guidance;
pub mod planner;
pub mod prelude;
pub mod ruleset;
pub mod state;
pub mod task;
