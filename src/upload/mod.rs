pub mod store;
pub mod validate;

pub use store::{StoredUpload, UploadStore};
pub use validate::{accept, validate};
