pub mod analysis;
pub mod classifier;
pub mod config;
pub mod error;
pub mod extractor;
pub mod models;
pub mod server;
pub mod upload;
pub mod utils;

pub use analysis::{analyze, Classification};
pub use classifier::{classify, KeywordTable, UNKNOWN};
pub use error::{Error, ExtractionError, Result, ValidationError};
pub use extractor::{extract, TextExtractor};
pub use models::{Format, UploadedDocument};
pub use upload::validate;
