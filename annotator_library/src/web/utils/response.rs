use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct UploadStatus {
    success: bool,
    filename: String,
}

impl UploadStatus {
    pub fn new(filename: String) -> Self {
        Self {
            success: true,
            filename,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct OperationStatus {
    success: bool,
    message: String,
}

impl OperationStatus {
    pub fn success<T: Into<String>>(message: T) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure<T: Into<String>>(message: T) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ClassesStatus {
    success: bool,
    classes: Vec<String>,
}

impl ClassesStatus {
    pub fn new(classes: Vec<String>) -> Self {
        Self {
            success: true,
            classes,
        }
    }
}
