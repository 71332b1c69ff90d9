//! Common test utilities for building rulesets, states, and planners.
use craftplan::prelude::*;

pub const ENTITY: &str = "agent";

/// Single-item, single-recipe ruleset: chopping wood, one unit per time
/// unit, with a goal of three wood in a budget of five.
#[allow(dead_code)]
pub fn chop_ruleset() -> Ruleset {
    Ruleset::parse(
        r#"{
            "Items": ["wood"],
            "Tools": [],
            "Recipes": {
                "chop": {
                    "Produces": {"wood": 1},
                    "Time": 1
                }
            },
            "Problem": {
                "Time": 5,
                "Initial": {},
                "Goal": {"wood": 3}
            }
        }"#,
    )
    .expect("chop ruleset should parse")
}

/// A tiered ruleset: a stone pickaxe needs cobble, cobble needs a wooden
/// pickaxe, and everything bottoms out at punching wood by hand. The
/// cheaper cobble recipe uses the stone pickaxe itself, so planning the
/// stone pickaxe has to route around the circular dependency.
#[allow(dead_code)]
pub fn tiered_ruleset() -> Ruleset {
    Ruleset::parse(
        r#"{
            "Items": ["wood", "plank", "stick", "cobble", "bench"],
            "Tools": ["wooden_pickaxe", "stone_pickaxe"],
            "Recipes": {
                "punch for wood": {
                    "Produces": {"wood": 1},
                    "Time": 4
                },
                "craft plank": {
                    "Produces": {"plank": 4},
                    "Consumes": {"wood": 1},
                    "Time": 1
                },
                "craft stick": {
                    "Produces": {"stick": 4},
                    "Consumes": {"plank": 2},
                    "Time": 1
                },
                "craft bench": {
                    "Produces": {"bench": 1},
                    "Consumes": {"plank": 4},
                    "Time": 1
                },
                "craft wooden_pickaxe at bench": {
                    "Produces": {"wooden_pickaxe": 1},
                    "Requires": {"bench": 1},
                    "Consumes": {"plank": 3, "stick": 2},
                    "Time": 1
                },
                "craft stone_pickaxe at bench": {
                    "Produces": {"stone_pickaxe": 1},
                    "Requires": {"bench": 1},
                    "Consumes": {"cobble": 3, "stick": 2},
                    "Time": 1
                },
                "wooden_pickaxe for cobble": {
                    "Produces": {"cobble": 1},
                    "Requires": {"wooden_pickaxe": 1},
                    "Time": 4
                },
                "stone_pickaxe for cobble": {
                    "Produces": {"cobble": 1},
                    "Requires": {"stone_pickaxe": 1},
                    "Time": 2
                }
            },
            "Problem": {
                "Time": 240,
                "Initial": {},
                "Goal": {"stone_pickaxe": 1}
            }
        }"#,
    )
    .expect("tiered ruleset should parse")
}

/// Ruleset with a self-referential tool recipe: the cheap way to forge a
/// saw requires a saw.
#[allow(dead_code)]
pub fn self_referential_ruleset() -> Ruleset {
    Ruleset::parse(
        r#"{
            "Items": ["metal"],
            "Tools": ["saw"],
            "Recipes": {
                "forge saw with saw": {
                    "Produces": {"saw": 1},
                    "Requires": {"saw": 1},
                    "Consumes": {"metal": 1},
                    "Time": 1
                },
                "forge saw by hand": {
                    "Produces": {"saw": 1},
                    "Consumes": {"metal": 2},
                    "Time": 3
                }
            },
            "Problem": {
                "Time": 10,
                "Initial": {"metal": 4},
                "Goal": {"saw": 1}
            }
        }"#,
    )
    .expect("self-referential ruleset should parse")
}

/// Compiles a ruleset and wires up a planner with default guidance,
/// returning the planner together with the initial state and goals.
#[allow(dead_code)]
pub fn guided_planner(ruleset: Ruleset) -> (Planner, WorldState, Vec<Task>) {
    let state = WorldState::initial(&ruleset, ENTITY);
    let goals = goal_tasks(&ruleset, ENTITY);
    let domain = DomainCompiler::new(ruleset)
        .compile()
        .expect("ruleset should compile");
    let guidance = SearchGuidance::for_domain(&domain);
    let planner = Planner::new(domain)
        .with_prune_hook(guidance.clone())
        .with_reorder_hook(guidance);
    (planner, state, goals)
}

#[allow(dead_code)]
pub fn have_enough(item: &str, amount: u64) -> Task {
    Task::HaveEnough {
        entity: ENTITY.to_string(),
        item: item.to_string(),
        amount,
    }
}

#[allow(dead_code)]
pub fn produce_item(item: &str) -> Task {
    Task::ProduceItem {
        entity: ENTITY.to_string(),
        item: item.to_string(),
    }
}

/// The recipe names of a candidate list, for permutation assertions.
#[allow(dead_code)]
pub fn candidate_names(candidates: &[MethodEntry]) -> Vec<String> {
    candidates
        .iter()
        .map(|entry| {
            entry
                .recipe
                .as_ref()
                .map(|recipe| recipe.name.clone())
                .unwrap_or_else(|| format!("{:?}", entry.kind))
        })
        .collect()
}
