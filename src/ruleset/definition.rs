use crate::error::RulesetError;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

/// A resource-to-quantity list that preserves the insertion order of the
/// ruleset file. Order matters: recipe methods emit their acquisition
/// subtasks in exactly this order.
pub type ResourceCounts = Vec<(String, u64)>;

/// The complete declarative crafting ruleset, ready for domain compilation.
///
/// This is the canonical in-memory form of the ruleset JSON format:
/// item and tool declarations, the recipe table, and the problem to solve
/// (time budget, initial inventory, goal inventory).
#[derive(Debug, Clone, Deserialize)]
pub struct Ruleset {
    #[serde(rename = "Items")]
    pub items: Vec<String>,
    #[serde(rename = "Tools")]
    pub tools: Vec<String>,
    #[serde(rename = "Recipes", deserialize_with = "recipe_entries")]
    pub recipes: Vec<NamedRecipe>,
    #[serde(rename = "Problem")]
    pub problem: Problem,
}

/// A recipe together with the name it was declared under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRecipe {
    pub name: String,
    pub rule: RecipeRule,
}

/// One recipe: tools that must be present, items that are consumed,
/// items that are produced, and the time cost of one application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecipeRule {
    /// Tools that must be present but are not consumed.
    #[serde(rename = "Requires", default, deserialize_with = "resource_counts")]
    pub requires: ResourceCounts,
    /// Items removed from the inventory on application.
    #[serde(rename = "Consumes", default, deserialize_with = "resource_counts")]
    pub consumes: ResourceCounts,
    /// Items added to the inventory on application. A recipe without this
    /// key fails to parse; a ruleset with such a recipe registers nothing.
    #[serde(rename = "Produces", deserialize_with = "resource_counts")]
    pub produces: ResourceCounts,
    /// Time cost of one application, in abstract units.
    #[serde(rename = "Time", default)]
    pub time: u64,
}

/// The planning problem: overall time budget, starting inventory, and the
/// target inventory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Problem {
    #[serde(rename = "Time")]
    pub time: u64,
    #[serde(rename = "Initial", default, deserialize_with = "resource_counts")]
    pub initial: ResourceCounts,
    #[serde(rename = "Goal", deserialize_with = "resource_counts")]
    pub goal: ResourceCounts,
}

impl Ruleset {
    /// Parses and validates a ruleset from its JSON text.
    pub fn parse(json: &str) -> Result<Self, RulesetError> {
        let ruleset: Ruleset = serde_json::from_str(json)?;
        ruleset.validate()?;
        Ok(ruleset)
    }

    /// Reads, parses, and validates a ruleset file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RulesetError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RulesetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Whether `name` is declared as a tool.
    pub fn is_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t == name)
    }

    /// Whether `name` is declared at all, as an item or a tool.
    pub fn declares(&self, name: &str) -> bool {
        self.items.iter().any(|i| i == name) || self.is_tool(name)
    }

    /// Checks every resource reference against the Items/Tools
    /// declarations. Any dangling reference is fatal; the domain compiler
    /// re-runs this so that a hand-built ruleset cannot register a
    /// partial domain.
    pub fn validate(&self) -> Result<(), RulesetError> {
        for recipe in &self.recipes {
            if recipe.rule.produces.is_empty() {
                return Err(RulesetError::EmptyProduces {
                    recipe: recipe.name.clone(),
                });
            }
            let references = recipe
                .rule
                .requires
                .iter()
                .chain(&recipe.rule.consumes)
                .chain(&recipe.rule.produces);
            for (resource, _) in references {
                if !self.declares(resource) {
                    return Err(RulesetError::UnknownResource {
                        recipe: recipe.name.clone(),
                        resource: resource.clone(),
                    });
                }
            }
        }
        for (section, counts) in [("Initial", &self.problem.initial), ("Goal", &self.problem.goal)]
        {
            for (resource, _) in counts {
                if !self.declares(resource) {
                    return Err(RulesetError::UnknownProblemResource {
                        section: section.to_string(),
                        resource: resource.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl RecipeRule {
    /// The quantity of `tool` this recipe requires present, 0 if none.
    pub fn required_amount(&self, tool: &str) -> u64 {
        self.requires
            .iter()
            .find(|(name, _)| name == tool)
            .map(|(_, amount)| *amount)
            .unwrap_or(0)
    }
}

/// Deserializes a JSON object of recipes into a name-ordered list.
/// `serde_json`'s `preserve_order` feature keeps the file's declaration
/// order, which later becomes the tie-break order for candidate recipes.
fn recipe_entries<'de, D>(deserializer: D) -> Result<Vec<NamedRecipe>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = serde_json::Map::deserialize(deserializer)?;
    map.into_iter()
        .map(|(name, value)| {
            let rule: RecipeRule = serde_json::from_value(value).map_err(|e| {
                serde::de::Error::custom(format!("recipe '{}': {}", name, e))
            })?;
            Ok(NamedRecipe { name, rule })
        })
        .collect()
}

/// Deserializes a JSON object of `{name: quantity}` pairs into an
/// order-preserving list, rejecting negative or fractional quantities.
fn resource_counts<'de, D>(deserializer: D) -> Result<ResourceCounts, D::Error>
where
    D: Deserializer<'de>,
{
    let map = serde_json::Map::deserialize(deserializer)?;
    map.into_iter()
        .map(|(name, value)| match value.as_u64() {
            Some(quantity) => Ok((name, quantity)),
            None => Err(serde::de::Error::custom(format!(
                "quantity for '{}' must be a non-negative integer, got {}",
                name, value
            ))),
        })
        .collect()
}
