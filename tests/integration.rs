//! End-to-end tests: ruleset in, plan out.
mod common;
use common::ENTITY;
use craftplan::prelude::*;

#[test]
fn test_chop_three_wood() {
    let (planner, state, goals) = common::guided_planner(common::chop_ruleset());
    let solution = planner.solve(state, goals, 0).expect("plan should exist");

    assert_eq!(solution.plan.len(), 3);
    assert!(solution.plan.iter().all(|step| step.recipe == "chop"));
    assert_eq!(solution.final_state.quantity("wood", ENTITY), 3);
    assert_eq!(solution.final_state.time_left(ENTITY), 2);
}

#[test]
fn test_satisfied_goal_needs_no_operators() {
    let ruleset = Ruleset::parse(
        r#"{
            "Items": ["wood"],
            "Tools": [],
            "Recipes": {
                "chop": {"Produces": {"wood": 1}, "Time": 1}
            },
            "Problem": {"Time": 5, "Initial": {"wood": 3}, "Goal": {"wood": 3}}
        }"#,
    )
    .unwrap();
    let (planner, state, goals) = common::guided_planner(ruleset);
    let solution = planner.solve(state, goals, 0).expect("plan should exist");

    assert!(solution.plan.is_empty());
    assert_eq!(solution.final_state.quantity("wood", ENTITY), 3);
    assert_eq!(solution.final_state.time_left(ENTITY), 5);
}

#[test]
fn test_insufficient_time_exhausts_search() {
    let ruleset = Ruleset::parse(
        r#"{
            "Items": ["wood"],
            "Tools": [],
            "Recipes": {
                "chop": {"Produces": {"wood": 1}, "Time": 1}
            },
            "Problem": {"Time": 2, "Initial": {}, "Goal": {"wood": 3}}
        }"#,
    )
    .unwrap();
    let (planner, state, goals) = common::guided_planner(ruleset);
    assert!(planner.plan(state, goals, 0).is_none());
}

#[test]
fn test_iterated_production_beyond_repetition_limit() {
    // Five productions of the same item in sequence: the calling stack
    // must not accumulate completed expansions, or the loop detector
    // would cut a perfectly linear plan.
    let ruleset = Ruleset::parse(
        r#"{
            "Items": ["wood"],
            "Tools": [],
            "Recipes": {
                "chop": {"Produces": {"wood": 1}, "Time": 1}
            },
            "Problem": {"Time": 10, "Initial": {}, "Goal": {"wood": 5}}
        }"#,
    )
    .unwrap();
    let (planner, state, goals) = common::guided_planner(ruleset);
    let solution = planner.solve(state, goals, 0).expect("plan should exist");

    assert_eq!(solution.plan.len(), 5);
    assert_eq!(solution.final_state.quantity("wood", ENTITY), 5);
}

#[test]
fn test_tiered_bootstrap_plans_lower_tier_first() {
    let (planner, state, goals) = common::guided_planner(common::tiered_ruleset());
    let solution = planner.solve(state, goals, 0).expect("plan should exist");

    let recipes: Vec<&str> = solution
        .plan
        .iter()
        .map(|step| step.recipe.as_str())
        .collect();

    assert_eq!(recipes.last(), Some(&"craft stone_pickaxe at bench"));
    assert_eq!(solution.final_state.quantity("stone_pickaxe", ENTITY), 1);

    // The wooden pickaxe exists before any cobble is mined, and the
    // stone pickaxe is never used to mine its own cobble.
    let wooden_crafted = recipes
        .iter()
        .position(|r| *r == "craft wooden_pickaxe at bench")
        .expect("the wooden pickaxe must be crafted");
    let first_mine = recipes
        .iter()
        .position(|r| *r == "wooden_pickaxe for cobble")
        .expect("cobble must be mined with the wooden pickaxe");
    assert!(wooden_crafted < first_mine);
    assert!(!recipes.contains(&"stone_pickaxe for cobble"));
}

#[test]
fn test_plan_time_accounting_is_exact() {
    let (planner, state, goals) = common::guided_planner(common::tiered_ruleset());
    let initial_time = state.time_left(ENTITY);
    let solution = planner.solve(state, goals, 0).expect("plan should exist");

    let spent: u64 = solution
        .plan
        .iter()
        .map(|step| {
            planner
                .domain()
                .operator(&step.recipe)
                .expect("every plan step names a registered operator")
                .recipe()
                .rule
                .time
        })
        .sum();
    assert_eq!(solution.final_state.time_left(ENTITY), initial_time - spent);
}

#[test]
fn test_self_referential_tool_is_bootstrapped_by_hand() {
    let (planner, state, goals) = common::guided_planner(common::self_referential_ruleset());
    let solution = planner.solve(state, goals, 0).expect("plan should exist");

    assert_eq!(solution.plan.len(), 1);
    assert_eq!(solution.plan[0].recipe, "forge saw by hand");
    assert_eq!(solution.final_state.quantity("saw", ENTITY), 1);
    assert_eq!(solution.final_state.quantity("metal", ENTITY), 2);
}

#[test]
fn test_unproducible_goal_exhausts_search() {
    // Nothing produces gems; the produce dispatcher has no methods to
    // try and the search fails cleanly instead of crashing.
    let ruleset = Ruleset::parse(
        r#"{
            "Items": ["wood", "gem"],
            "Tools": [],
            "Recipes": {
                "chop": {"Produces": {"wood": 1}, "Time": 1}
            },
            "Problem": {"Time": 5, "Initial": {}, "Goal": {"gem": 1}}
        }"#,
    )
    .unwrap();
    let (planner, state, goals) = common::guided_planner(ruleset);
    assert!(planner.plan(state, goals, 0).is_none());
}

#[test]
fn test_bundled_ruleset_plans() {
    let ruleset = Ruleset::from_file("data/crafting.json").expect("bundled ruleset loads");
    let (planner, state, goals) = common::guided_planner(ruleset);
    let solution = planner.solve(state, goals, 0).expect("plan should exist");

    assert_eq!(solution.final_state.quantity("wooden_pickaxe", ENTITY), 1);
    assert_eq!(
        solution.plan.last().map(|step| step.recipe.as_str()),
        Some("craft wooden_pickaxe at bench")
    );
}
