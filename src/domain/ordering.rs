use crate::ruleset::RecipeRule;
use ahash::AHashSet;

/// Penalty for a recipe that requires the very tool it produces.
const SELF_REFERENCE_PENALTY: u32 = 1000;
/// Penalty per required tool whose tier is not below the produced tool's.
const TIER_PENALTY: u32 = 100;

/// Maps tool-name substrings to tiers, used to spot recipes that try to
/// bootstrap a tool with an equal-or-higher-tier tool.
///
/// The default table covers the conventional wooden < stone < iron
/// families; domains with other naming schemes supply their own table.
/// A name matching no entry sits at tier 0.
#[derive(Debug, Clone)]
pub struct TierTable {
    entries: Vec<(String, u32)>,
}

impl Default for TierTable {
    fn default() -> Self {
        Self::new(vec![
            ("wooden".to_string(), 1),
            ("stone".to_string(), 2),
            ("iron".to_string(), 3),
        ])
    }
}

impl TierTable {
    pub fn new(entries: Vec<(String, u32)>) -> Self {
        Self { entries }
    }

    /// The inferred tier of a tool name: the highest tier among matching
    /// substrings, 0 when nothing matches.
    pub fn tier_of(&self, name: &str) -> u32 {
        self.entries
            .iter()
            .filter(|(substring, _)| name.contains(substring.as_str()))
            .map(|(_, tier)| *tier)
            .max()
            .unwrap_or(0)
    }
}

/// The static, compile-time sort key for one candidate recipe producing
/// `product`. Lower keys are tried first.
///
/// The leading component penalizes circular tool dependencies: a recipe
/// requiring its own product is effectively last, and every required tool
/// at a tier at or above the product's adds a smaller penalty. The
/// remaining components prefer fewer required tools, fewer consumables,
/// and less time, in that order. Penalties apply only when the product is
/// itself a tool; item recipes sort purely on the count and time
/// components.
pub fn recipe_sort_key(
    product: &str,
    rule: &RecipeRule,
    tools: &AHashSet<String>,
    tiers: &TierTable,
) -> (u32, usize, usize, u64) {
    let mut circularity_penalty = 0;
    if tools.contains(product) {
        let product_tier = tiers.tier_of(product);
        for (required_tool, _) in &rule.requires {
            if required_tool == product {
                circularity_penalty += SELF_REFERENCE_PENALTY;
            } else if tools.contains(required_tool)
                && tiers.tier_of(required_tool) >= product_tier
            {
                circularity_penalty += TIER_PENALTY;
            }
        }
    }
    (
        circularity_penalty,
        rule.requires.len(),
        rule.consumes.len(),
        rule.time,
    )
}
