//! Compilation of a validated ruleset into an HTN domain: method and
//! operator registries plus the static candidate ordering.

use crate::error::RulesetError;
use crate::ruleset::{NamedRecipe, Ruleset};
use crate::task::TaskKey;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::sync::Arc;

mod method;
mod operator;
pub mod ordering;

pub use method::{Decomposition, MethodEntry, MethodKind};
pub use operator::{OperatorOutcome, RecipeOperator};
pub use ordering::TierTable;

/// A compiled HTN domain: every task kind mapped to its ordered candidate
/// methods, and every recipe mapped to its primitive operator.
///
/// The registries are built once at compile time and resolved by ordinary
/// key lookup during search.
#[derive(Debug, Clone)]
pub struct Domain {
    methods: AHashMap<TaskKey, Vec<MethodEntry>>,
    operators: AHashMap<String, RecipeOperator>,
    tools: AHashSet<String>,
}

impl Domain {
    /// The ordered candidate methods for a compound task, `None` for a
    /// task kind the domain never registered (an unproducible item's
    /// production task, for instance).
    pub fn methods_for(&self, key: &TaskKey) -> Option<&[MethodEntry]> {
        self.methods.get(key).map(Vec::as_slice)
    }

    /// The primitive operator for a recipe name.
    pub fn operator(&self, recipe: &str) -> Option<&RecipeOperator> {
        self.operators.get(recipe)
    }

    /// The declared tool names, shared with the search guidance.
    pub fn tools(&self) -> &AHashSet<String> {
        &self.tools
    }

    /// The distinct items some recipe can produce.
    pub fn produced_items(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().filter_map(|key| match key {
            TaskKey::ProduceItem(item) => Some(item.as_str()),
            _ => None,
        })
    }
}

/// Compiles a ruleset into a [`Domain`].
///
/// The compiler registers the generic acquire/produce method pair, one
/// dispatcher per produced item, one recipe method per producing recipe
/// (statically ordered, circular-dependency-averse), and one operator per
/// recipe.
pub struct DomainCompiler {
    ruleset: Ruleset,
    tiers: TierTable,
}

impl DomainCompiler {
    pub fn new(ruleset: Ruleset) -> Self {
        Self {
            ruleset,
            tiers: TierTable::default(),
        }
    }

    /// Replaces the default wooden/stone/iron tier table, for domains
    /// with a different tool-naming scheme.
    pub fn with_tier_table(mut self, tiers: TierTable) -> Self {
        self.tiers = tiers;
        self
    }

    /// Validates the ruleset and builds the registries. On any validation
    /// failure nothing is registered.
    pub fn compile(self) -> Result<Domain, RulesetError> {
        self.ruleset.validate()?;

        let tools: AHashSet<String> = self.ruleset.tools.iter().cloned().collect();
        let recipes: Vec<Arc<NamedRecipe>> =
            self.ruleset.recipes.iter().cloned().map(Arc::new).collect();

        let mut methods: AHashMap<TaskKey, Vec<MethodEntry>> = AHashMap::new();

        // The generic acquire pair: trivial check first, then
        // produce-and-recheck. The order is fixed by the domain design.
        methods.insert(
            TaskKey::HaveEnough,
            vec![
                MethodEntry::generic(MethodKind::CheckEnough),
                MethodEntry::generic(MethodKind::ProduceEnough),
            ],
        );
        methods.insert(
            TaskKey::Produce,
            vec![MethodEntry::generic(MethodKind::Dispatch)],
        );

        let by_product: AHashMap<String, Vec<Arc<NamedRecipe>>> = recipes
            .iter()
            .flat_map(|recipe| {
                recipe
                    .rule
                    .produces
                    .iter()
                    .map(move |(product, _)| (product.clone(), recipe.clone()))
            })
            .into_group_map()
            .into_iter()
            .collect();

        for (product, mut candidates) in by_product {
            // Stable sort: ties keep the ruleset's declaration order.
            candidates.sort_by_key(|recipe| {
                ordering::recipe_sort_key(&product, &recipe.rule, &tools, &self.tiers)
            });
            methods.insert(
                TaskKey::ProduceItem(product),
                candidates.into_iter().map(MethodEntry::from_recipe).collect(),
            );
        }

        let operators = recipes
            .into_iter()
            .map(|recipe| (recipe.name.clone(), RecipeOperator::new(recipe)))
            .collect();

        Ok(Domain {
            methods,
            operators,
            tools,
        })
    }
}
