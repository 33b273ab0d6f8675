use crate::annotator::utils::annotation_record::AnnotationRecord;
use common::utils::log_entry::annotation::AnnotationEntry;
use serde::{Deserialize, Serialize};

/// A box in pixel units with its origin at the image's top-left corner.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub class_id: Option<u32>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

impl BoundingBox {
    /// Converts to center format with every coordinate divided by the image size.
    /// Geometry is not validated: boxes outside the image yield values outside [0, 1].
    pub fn normalize(&self, image_size: &ImageSize) -> Result<AnnotationRecord, AnnotationEntry> {
        if image_size.is_degenerate() {
            return Err(AnnotationEntry::ZeroImageDimension(image_size.width, image_size.height));
        }
        Ok(AnnotationRecord {
            class_id: self.class_id.unwrap_or(0),
            x_center: (self.x + self.width / 2.0) / image_size.width,
            y_center: (self.y + self.height / 2.0) / image_size.height,
            width: self.width / image_size.width,
            height: self.height / image_size.height,
        })
    }
}
