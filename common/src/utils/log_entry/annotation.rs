use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotationEntry {
    #[error("Image {0} saved")]
    ImageSaved(String),
    #[error("Annotations saved to {0}, {1} boxes")]
    AnnotationsSaved(String, usize),
    #[error("Class {0} added")]
    ClassAdded(String),
    #[error("Missing image field")]
    MissingImageField,
    #[error("Invalid filename")]
    InvalidFileName,
    #[error("Image dimensions must be non-zero, got {0}x{1}")]
    ZeroImageDimension(f64, f64),
    #[error("Failed to save image: {0}")]
    SaveImageError(String),
    #[error("Failed to save annotations: {0}")]
    SaveAnnotationsError(String),
    #[error("Class name is empty")]
    EmptyClassName,
    #[error("Class already exists")]
    DuplicateClassName,
    #[error("Class registry is unreadable, treated as empty: {0}")]
    UnreadableClassRegistry(String),
    #[error("Failed to save class registry: {0}")]
    SaveClassRegistryError(String),
}

impl AnnotationEntry {
    /// Failures caused by the request itself rather than by the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AnnotationEntry::MissingImageField
                | AnnotationEntry::InvalidFileName
                | AnnotationEntry::EmptyClassName
                | AnnotationEntry::DuplicateClassName
        )
    }
}

impl From<AnnotationEntry> for String {
    #[inline(always)]
    fn from(value: AnnotationEntry) -> Self {
        value.to_string()
    }
}
