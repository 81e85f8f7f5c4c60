use std::path::PathBuf;

/// Errors for a single generation run. All fail-fast: the first one aborts
/// the run for that source/destination pair.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("Source path `{path}` does not exist or does not have read permission")]
    SourcePathInvalid { path: PathBuf },

    #[error("Not found any query in `{path}` source path")]
    EmptySourceCorpus { path: PathBuf },

    #[error("Destination path `{path}` does not exist or does not have write permission")]
    DestinationNotWritable { path: PathBuf },

    #[error("Not support generating code from {description}")]
    UnsupportedDefinitionKind { description: String },

    #[error("Operation of kind `{kind}` should have a name")]
    UnnamedOperation { kind: &'static str },

    #[error("Duplicate operation name `{name}`")]
    DuplicateOperationName { name: String },

    #[error("Missing fragment `{name}`, did you forget to define it?")]
    MissingFragment { name: String },

    #[error("Operation `{operation}` maps to artifact name `{artifact}` which {reason}")]
    ArtifactNamingConflict {
        operation: String,
        artifact: String,
        reason: String,
    },

    #[error("Failed to parse source corpus: {0}")]
    Syntax(#[from] graphql_parser::query::ParseError),

    #[error("Failed to serialize operation AST: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write artifact `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
