//! Share domain entities.

pub mod attachment;
pub mod file_kind;
pub mod language;
pub mod model;

pub use attachment::{Attachment, NewAttachment};
pub use file_kind::FileKind;
pub use language::{LANGUAGES, PLAIN_TEXT, code_class, normalize_language};
pub use model::{NewShare, Share, ShareContent, ShareRow, ShareType, TextStats};
