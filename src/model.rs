/// The console server configuration could not be rendered
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A field every console configuration needs was never set
    #[error("Missing required console config field: {0}")]
    MissingField(&'static str),

    #[error("Could not serialize console config: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

/// A configuration layer is not well-formed YAML
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("YAML Parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed, but its root is not a mapping
    #[error("Document root must be a mapping, found {0}")]
    NotAMapping(String),
}

/// Errors raised while merging configuration layers
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Layer positions are 0-based; the unsupported override comes after every regular layer
    #[error("Could not parse config layer {layer}: {source}")]
    Layer {
        layer: usize,
        #[source]
        source: ParseError,
    },

    #[error("Could not emit merged config: {0}")]
    Emit(#[source] serde_yaml::Error),
}

/// All errors possible to occur while synthesizing the console ConfigMap
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("Failed to generate default console-config: {0}")]
    DefaultConfig(#[source] RenderError),

    #[error("Failed to generate user defined console-config: {0}")]
    UserConfig(#[source] RenderError),

    #[error("Failed to merge console-config: {0}")]
    Merge(#[from] MergeError),

    /// An embedded resource template is malformed
    #[error("Invalid resource template: {0}")]
    Asset(#[source] serde_yaml::Error),
}

/// All errors possible to occur during reconciliation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Any error originating from the `kube-rs` crate
    #[error("Kubernetes reported error: {source}")]
    KubeError {
        #[from]
        source: kube::Error,
    },

    #[error("Console config synthesis error: {0}")]
    SynthesisError(#[from] SynthesisError),

    /// A resource the console configuration depends on does not exist yet
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// The operator configuration file is missing or invalid
    #[error("Invalid operator configuration: {0}")]
    OperatorConfigError(String),

    #[error("YAML Parsing error: {0}")]
    ParserError(
        #[from]
        serde_yaml::Error,
    ),
}
