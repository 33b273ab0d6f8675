pub mod annotation_record;
pub mod bounding_box;
pub mod secure_filename;
