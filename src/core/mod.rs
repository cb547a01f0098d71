pub mod format;
pub mod inserter;

pub use crate::domain::model::{AppendTextRequest, ImageBlob, InsertImageRequest};
pub use crate::domain::ports::{DocumentStore, ImageFetcher};
pub use crate::utils::error::Result;
