//! Error types for schema generation

use thiserror::Error;

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Error type for schema generation and generator configuration
#[derive(Error, Debug)]
pub enum SchemaError {
    /// An ignore-type pattern could not be compiled
    #[error("invalid ignore pattern '{pattern}': {reason}")]
    InvalidIgnorePattern { pattern: String, reason: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    InvalidConfig(String),

    /// A bean refers back to itself while bean definitions are not in effect
    #[error("recursion detected: {}", path.join(" -> "))]
    Recursion { path: Vec<String> },

    /// The type graph nests deeper than the configured maximum
    #[error("maximum depth {max_depth} exceeded at type {type_name}")]
    DepthExceeded { max_depth: usize, type_name: String },

    /// An example value could not be rendered
    #[error("could not render example for {type_name}: {reason}")]
    Render { type_name: String, reason: String },

    /// Two distinct bean types map to the same definition id
    #[error("definition id '{id}' is already used by {existing}, cannot register {incoming}")]
    DefinitionCollision {
        id: String,
        existing: String,
        incoming: String,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SchemaError {
    /// Returns a stable numeric code for this error kind
    pub fn error_code(&self) -> u32 {
        match self {
            SchemaError::InvalidIgnorePattern { .. } => 1,
            SchemaError::InvalidConfig(_) => 2,
            SchemaError::Recursion { .. } => 3,
            SchemaError::DepthExceeded { .. } => 4,
            SchemaError::Render { .. } => 5,
            SchemaError::DefinitionCollision { .. } => 6,
            SchemaError::Serialization(_) => 7,
        }
    }

    /// Whether the error was raised while building a generator rather than generating
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SchemaError::InvalidIgnorePattern { .. } | SchemaError::InvalidConfig(_)
        )
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SchemaError {
    fn from(err: toml::de::Error) -> Self {
        SchemaError::InvalidConfig(err.to_string())
    }
}
