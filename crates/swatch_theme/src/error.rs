//! Error types for the theme engine

use thiserror::Error;

/// Failure reading or writing the persisted theme document
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("invalid theme document: {0}")]
    Document(#[from] serde_json::Error),
    #[error("invalid engine config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("unknown palette `{0}`")]
    UnknownPalette(String),
    #[error("unknown shade `{0}`")]
    UnknownShade(String),
    #[error("unknown alias role `{0}`")]
    UnknownAlias(String),
    #[error("shadow layer {index} out of range ({len} layers)")]
    LayerOutOfRange { index: usize, len: usize },
    #[error("shadow layer {0} is hidden")]
    LayerHidden(usize),
    #[error("invalid typography path `{0}`")]
    TypographyPath(String),
    #[error("invalid skin {kind} `{value}`")]
    Skin { kind: &'static str, value: String },
    #[error("export failed: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, ThemeError>;
