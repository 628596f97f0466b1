//! Image ingestion for post attachments.
//!
//! Files are filtered by declared media type, read asynchronously and
//! encoded as `data:` URIs so drafts can carry them inline.

mod ingest;

pub use ingest::{
    FileInput, FileSource, IngestReport, SkipReason, SkippedFile, encode_data_url,
    guess_media_type, ingest,
};
