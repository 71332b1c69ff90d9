use thiserror::Error;

/// Errors that can occur while loading, parsing, or validating a ruleset.
///
/// All of these are fatal at load time: no partial domain is ever
/// registered from a ruleset that fails to load. Search exhaustion is not
/// an error (the planner returns `None` for it), and method/operator
/// not-applicability is a first-class result variant, never an `Err`.
#[derive(Error, Debug)]
pub enum RulesetError {
    #[error("failed to read ruleset file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse ruleset JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("recipe '{recipe}' produces nothing")]
    EmptyProduces { recipe: String },

    #[error("recipe '{recipe}' references '{resource}', which is not declared in Items or Tools")]
    UnknownResource { recipe: String, resource: String },

    #[error(
        "the problem's {section} references '{resource}', which is not declared in Items or Tools"
    )]
    UnknownProblemResource { section: String, resource: String },
}
