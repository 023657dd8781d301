/// Errors that can occur while building or loading the normalized catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Duplicate machine name: {0}")]
    DuplicateName(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl CatalogError {
    pub fn missing_input(path: &std::path::Path) -> Self {
        Self::MissingInput(path.display().to_string())
    }

    pub fn invalid_catalog(msg: impl Into<String>) -> Self {
        Self::InvalidCatalog(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
