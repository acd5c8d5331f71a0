pub mod job;
pub mod source;

pub use job::{IngestReport, IngestionJob, DEFAULT_PAGE_SIZE};
pub use source::{ProductPage, ProductSource, RemoteImage, RemoteProduct, SkipReason};
