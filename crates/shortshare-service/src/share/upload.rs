//! Files submitted for a new files share.

use bytes::Bytes;

/// One file of a files share, fully buffered.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// File name; becomes the last segment of the blob key.
    pub name: String,
    /// File contents.
    pub data: Bytes,
    /// MIME type reported by the submitter.
    pub mime_type: Option<String>,
}

impl FileUpload {
    /// Create an upload.
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>, mime_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            mime_type: mime_type.map(str::to_string),
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}
