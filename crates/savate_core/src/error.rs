use thiserror::Error;

/// Library-level failures: configuration, data loading, localisation and export.
///
/// None of these come from athlete input. Input problems are [`EntryError`].
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid grade table: {0}")]
    GradeTable(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Locale {locale} not loaded")]
    LocaleNotLoaded { locale: String },

    #[error("Localisation error: {0}")]
    Localisation(String),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("PDF export error: {0}")]
    Pdf(String),
}

impl CoreError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoreError::Io(_) => true,
            CoreError::LocaleNotLoaded { .. } => true, // fallback locale still works
            CoreError::Config(_) => false,
            CoreError::GradeTable(_) => false,
            CoreError::Yaml(_) => false,
            CoreError::Localisation(_) => false,
            CoreError::Csv(_) | CoreError::Pdf(_) => false,
        }
    }
}

impl From<lopdf::Error> for CoreError {
    fn from(err: lopdf::Error) -> Self {
        CoreError::Pdf(err.to_string())
    }
}

/// Rejected athlete submission. The store is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("first name is required")]
    MissingFirstName,

    #[error("unknown sex code: {0}")]
    InvalidSex(String),

    #[error("invalid step value: {0}")]
    InvalidStep(String),
}

impl EntryError {
    /// Catalogue key of the message shown to the coach.
    pub fn message_key(&self) -> &'static str {
        match self {
            EntryError::MissingFirstName => "error-first-name-required",
            EntryError::InvalidSex(_) => "error-invalid-sex",
            EntryError::InvalidStep(_) => "error-invalid-step",
        }
    }

    /// Offending value, passed to the catalogue as `$value`.
    pub fn value(&self) -> Option<&str> {
        match self {
            EntryError::MissingFirstName => None,
            EntryError::InvalidSex(v) | EntryError::InvalidStep(v) => Some(v),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
