use craftplan::prelude::*;
use std::env;

const DEFAULT_RULESET: &str = "crafting.json";
const ENTITY: &str = "agent";

fn main() {
    // Parse command line arguments: optional ruleset path, optional
    // verbosity level (0-3).
    let args: Vec<String> = env::args().collect();
    if args.len() > 3 {
        eprintln!("Usage: craftplan [path/to/crafting.json] [verbosity]");
        std::process::exit(1);
    }

    let ruleset_path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_RULESET);
    let verbosity: u8 = match args.get(2) {
        Some(level) => match level.parse() {
            Ok(level) => level,
            Err(_) => {
                eprintln!("Verbosity must be a small integer, got '{}'", level);
                std::process::exit(1);
            }
        },
        None => 1,
    };

    println!("Loading ruleset from: {}", ruleset_path);
    let ruleset = match Ruleset::from_file(ruleset_path) {
        Ok(ruleset) => ruleset,
        Err(e) => {
            eprintln!("Failed to load ruleset: {}", e);
            std::process::exit(1);
        }
    };

    let state = WorldState::initial(&ruleset, ENTITY);
    let goals = goal_tasks(&ruleset, ENTITY);

    println!(
        "Compiling domain: {} item(s), {} tool(s), {} recipe(s)",
        ruleset.items.len(),
        ruleset.tools.len(),
        ruleset.recipes.len()
    );
    let domain = match DomainCompiler::new(ruleset).compile() {
        Ok(domain) => domain,
        Err(e) => {
            eprintln!("Domain compilation failed: {}", e);
            std::process::exit(1);
        }
    };

    let guidance = SearchGuidance::for_domain(&domain);
    let planner = Planner::new(domain)
        .with_prune_hook(guidance.clone())
        .with_reorder_hook(guidance);

    match planner.solve(state, goals, verbosity) {
        Some(solution) => {
            println!("\nPlan found ({} step(s)):", solution.plan.len());
            for (index, step) in solution.plan.iter().enumerate() {
                println!("  {:>3}. {}", index + 1, step);
            }
            println!(
                "Remaining time: {}",
                solution.final_state.time_left(ENTITY)
            );
        }
        None => {
            println!("\nNo plan found.");
        }
    }
}
