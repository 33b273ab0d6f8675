use crate::annotator::utils::annotation_record::AnnotationRecord;
use crate::annotator::utils::secure_filename::secure_filename;
use crate::utils::config::Config;
use crate::utils::logging::*;
use actix_web::web::Bytes;
use futures::{Stream, StreamExt};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;

static PARTIAL_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Owns the flat upload and annotation directories.
///
/// Annotation files are rewritten in full on every save: the last save for an
/// image wins and earlier boxes are never merged in.
#[derive(Debug, Clone)]
pub struct FileManager {
    upload_directory: PathBuf,
    annotation_directory: PathBuf,
}

impl FileManager {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(upload_directory: P, annotation_directory: Q) -> Self {
        Self {
            upload_directory: upload_directory.into(),
            annotation_directory: annotation_directory.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.upload_directory, &config.annotation_directory)
    }

    pub async fn initialize(&self) {
        for folder in [&self.upload_directory, &self.annotation_directory] {
            match fs::create_dir_all(folder).await {
                Ok(_) => logging_information!(IOEntry::CreateDirectorySuccess(folder.display())),
                Err(err) => logging_error!(IOEntry::CreateDirectoryError(folder.display(), err)),
            }
        }
    }

    /// `file_name` must already be sanitized.
    pub fn image_path(&self, file_name: &str) -> PathBuf {
        self.upload_directory.join(file_name)
    }

    /// `dog.png` maps to `<annotation_directory>/dog.txt`; only the last extension is replaced.
    pub fn annotation_path(&self, image_name: &str) -> Result<PathBuf, AnnotationEntry> {
        let file_name = secure_filename(image_name);
        if file_name.is_empty() {
            return Err(AnnotationEntry::InvalidFileName);
        }
        let stem = match file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file_name.as_str(),
        };
        Ok(self.annotation_directory.join(format!("{stem}.txt")))
    }

    /// Streams `chunks` into the upload directory, replacing any image of the same name.
    ///
    /// Bytes land in a hidden partial file first, so an interrupted upload
    /// leaves the previous image untouched.
    pub async fn save_image<S, E>(&self, file_name: &str, chunks: S) -> Result<PathBuf, AnnotationEntry>
    where
        S: Stream<Item = Result<Bytes, E>> + Unpin,
        E: Display,
    {
        let image_path = self.image_path(file_name);
        let partial_path = self.partial_path(file_name);
        let result: Result<(), String> = match Self::write_stream(&partial_path, chunks).await {
            Ok(()) => fs::rename(&partial_path, &image_path).await
                .map_err(|err| String::from(IOEntry::ReplaceFileError(image_path.display(), err))),
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            let _ = fs::remove_file(&partial_path).await;
            return Err(AnnotationEntry::SaveImageError(err));
        }
        Ok(image_path)
    }

    fn partial_path(&self, file_name: &str) -> PathBuf {
        let sequence = PARTIAL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        self.upload_directory.join(format!(".{file_name}.{sequence}.part"))
    }

    async fn write_stream<S, E>(file_path: &Path, mut chunks: S) -> Result<(), String>
    where
        S: Stream<Item = Result<Bytes, E>> + Unpin,
        E: Display,
    {
        let mut file = fs::File::create(file_path).await
            .map_err(|err| String::from(IOEntry::CreateFileError(file_path.display(), err)))?;
        while let Some(chunk) = chunks.next().await {
            let data = chunk
                .map_err(|err| String::from(NetworkEntry::MultipartError(err.to_string())))?;
            file.write_all(&data).await
                .map_err(|err| String::from(IOEntry::WriteFileError(file_path.display(), err)))?;
        }
        file.flush().await
            .map_err(|err| String::from(IOEntry::WriteFileError(file_path.display(), err)))
    }

    pub async fn save_annotations(&self, image_name: &str, records: &[AnnotationRecord]) -> Result<PathBuf, AnnotationEntry> {
        let annotation_path = self.annotation_path(image_name)?;
        let content = records.iter().map(|record| format!("{record}\n")).collect::<String>();
        Self::write_file(&annotation_path, content.as_bytes()).await
            .map_err(AnnotationEntry::SaveAnnotationsError)?;
        Ok(annotation_path)
    }

    async fn write_file(file_path: &Path, data: &[u8]) -> Result<(), String> {
        let mut file = fs::File::create(file_path).await
            .map_err(|err| String::from(IOEntry::CreateFileError(file_path.display(), err)))?;
        file.write_all(data).await
            .map_err(|err| String::from(IOEntry::WriteFileError(file_path.display(), err)))?;
        file.flush().await
            .map_err(|err| String::from(IOEntry::WriteFileError(file_path.display(), err)))?;
        Ok(())
    }
}
