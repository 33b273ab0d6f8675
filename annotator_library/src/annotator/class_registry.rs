use crate::utils::logging::*;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;

/// Backing storage for the ordered list of class labels.
#[async_trait]
pub trait ClassStore: Send + Sync {
    /// An absent store loads as an empty list; a corrupt one is an error.
    async fn load(&self) -> Result<Vec<String>, String>;

    /// Replaces the whole stored list.
    async fn save(&self, classes: &[String]) -> Result<(), String>;
}

/// Stores the registry as a pretty-printed JSON array of strings.
pub struct JsonClassStore {
    path: PathBuf,
}

impl JsonClassStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
        }
    }
}

#[async_trait]
impl ClassStore for JsonClassStore {
    async fn load(&self) -> Result<Vec<String>, String> {
        let json_string = match fs::read_to_string(&self.path).await {
            Ok(json_string) => json_string,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(IOEntry::ReadFileError(self.path.display(), err).into()),
        };
        serde_json::from_str::<Vec<String>>(&json_string)
            .map_err(|err| IOEntry::SerdeDeserializeError(self.path.display(), err).into())
    }

    async fn save(&self, classes: &[String]) -> Result<(), String> {
        let json_string = serde_json::to_string_pretty(classes)
            .map_err(|err| String::from(IOEntry::SerdeSerializeError(err)))?;
        fs::write(&self.path, json_string).await
            .map_err(|err| IOEntry::WriteFileError(self.path.display(), err).into())
    }
}

/// Keeps the registry in process memory.
#[derive(Default)]
pub struct MemoryClassStore {
    classes: Mutex<Vec<String>>,
}

impl MemoryClassStore {
    pub fn new(classes: Vec<String>) -> Self {
        Self {
            classes: Mutex::new(classes),
        }
    }
}

#[async_trait]
impl ClassStore for MemoryClassStore {
    async fn load(&self) -> Result<Vec<String>, String> {
        Ok(self.classes.lock().await.clone())
    }

    async fn save(&self, classes: &[String]) -> Result<(), String> {
        *self.classes.lock().await = classes.to_vec();
        Ok(())
    }
}

/// Deduplicated, insertion-ordered list of class labels.
///
/// Every call reloads from the store. `add` is an unguarded read-modify-write,
/// so concurrent adds may lose updates.
pub struct ClassRegistry {
    store: Box<dyn ClassStore>,
}

impl ClassRegistry {
    pub fn new<S: ClassStore + 'static>(store: S) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Unreadable or malformed stores are logged and read as empty.
    pub async fn list(&self) -> Vec<String> {
        match self.store.load().await {
            Ok(classes) => classes,
            Err(err) => {
                logging_warning!(AnnotationEntry::UnreadableClassRegistry(err));
                Vec::new()
            }
        }
    }

    pub async fn add(&self, class_name: &str) -> Result<Vec<String>, AnnotationEntry> {
        let class_name = class_name.trim();
        if class_name.is_empty() {
            return Err(AnnotationEntry::EmptyClassName);
        }
        let mut classes = self.list().await;
        if classes.iter().any(|class| class == class_name) {
            return Err(AnnotationEntry::DuplicateClassName);
        }
        classes.push(class_name.to_string());
        self.store.save(&classes).await
            .map_err(AnnotationEntry::SaveClassRegistryError)?;
        Ok(classes)
    }
}
