//! Error types for dsync-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Embedded definition is not valid data: {source} (near `{excerpt}`)")]
    InvalidLiteral {
        excerpt: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Call to {factory} has no closing parenthesis after its definition")]
    UnterminatedLiteral { factory: String },

    #[error("Invalid anchor pattern for {factory}: {source}")]
    Pattern {
        factory: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to serialize definition for {name}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
