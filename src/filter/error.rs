use thiserror::Error;

/// Errors that can occur when compiling filter expressions
#[derive(Debug, Error)]
pub enum FilterParseError {
    #[error("missing ':' separator in filter clause '{0}'")]
    MissingSeparator(String),

    #[error("invalid object rule in filter clause '{clause}'")]
    ObjectRule {
        clause: String,
        #[source]
        source: ObjectRuleError,
    },
}

/// Errors for malformed object rule bodies
#[derive(Debug, Error)]
pub enum ObjectRuleError {
    #[error("expected closing '}}'")]
    Unterminated,

    #[error("nested object values are not supported")]
    NestedObject,

    #[error("incomplete entry '{0}', expected 'key:value' or '*'")]
    IncompleteEntry(String),

    #[error("invalid key {0}: {1}")]
    InvalidKey(String, String),

    #[error("invalid literal '{0}': {1}")]
    InvalidLiteral(String, String),
}
