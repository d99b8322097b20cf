mod file;

pub use file::{FilePurpose, NewStoredFile, StoredFile};
