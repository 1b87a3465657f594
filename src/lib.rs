//! Race a set of byte streams to find which of them carries a marker byte
//! at the earliest offset.
//!
//! Streams are opened up front with [`StreamSource`] or [`open_files`],
//! handed to a [`RaceScanner`], and scanned in lock-step one byte per
//! round. Only the content of the winning streams is kept.

mod errors;
pub mod scanner;
pub mod source;
pub mod stream;

pub use errors::{RaceError, Result};
pub use scanner::RaceScanner;
pub use source::{join_url, open_files, StreamSource, USER_AGENT};
pub use stream::ByteStream;
