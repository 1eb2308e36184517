//! Single-file blur-and-save unit of work

use std::path::PathBuf;

use image::ImageReader;

use crate::pipeline::filter::BoxBlur;
use crate::{BlurBenchError, Result};

/// One file's blur-and-save task
///
/// Owns everything a worker needs, so it can be moved to another thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// File name inside the source folder
    pub file_id: String,
    /// Folder the blurred file is written to
    pub dest_dir: PathBuf,
}

impl WorkItem {
    pub fn new(file_id: impl Into<String>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            file_id: file_id.into(),
            dest_dir: dest_dir.into(),
        }
    }

    /// Path the blurred image is written to
    pub fn output_path(&self) -> PathBuf {
        self.dest_dir.join(&self.file_id)
    }
}

/// Loads a source image, blurs it and saves it under the same name
#[derive(Debug, Clone)]
pub struct ItemProcessor {
    source_dir: PathBuf,
    filter: BoxBlur,
}

impl ItemProcessor {
    pub fn new(source_dir: impl Into<PathBuf>, filter: BoxBlur) -> Self {
        Self {
            source_dir: source_dir.into(),
            filter,
        }
    }

    /// Process one work item, returning its file id on success.
    ///
    /// The output keeps the container format of the source, detected from
    /// the file contents. An existing output file is overwritten.
    pub fn process(&self, item: &WorkItem) -> Result<String> {
        let source_path = self.source_dir.join(&item.file_id);

        if !item.dest_dir.is_dir() {
            return Err(BlurBenchError::WriteError(format!(
                "destination folder {} does not exist",
                item.dest_dir.display()
            )));
        }

        let reader = ImageReader::open(&source_path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| {
                BlurBenchError::DecodeError(format!("{}: {}", source_path.display(), e))
            })?;

        let format = reader.format().ok_or_else(|| {
            BlurBenchError::DecodeError(format!(
                "{}: unrecognized image format",
                source_path.display()
            ))
        })?;

        let image = reader.decode().map_err(|e| {
            BlurBenchError::DecodeError(format!("{}: {}", source_path.display(), e))
        })?;

        let blurred = self.filter.apply(&image);

        let output_path = item.output_path();
        blurred.save_with_format(&output_path, format).map_err(|e| {
            BlurBenchError::WriteError(format!("{}: {}", output_path.display(), e))
        })?;

        log::debug!(
            "blurred {} -> {} ({}x{})",
            source_path.display(),
            output_path.display(),
            blurred.width(),
            blurred.height()
        );

        Ok(item.file_id.clone())
    }
}
