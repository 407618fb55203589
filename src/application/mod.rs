//! Application layer: dataset ingestion and use cases
//!
//! This layer turns external input into a loaded `SocialNetwork`.

pub mod dataset;
pub mod error;
pub mod error_ext;

pub use dataset::{load_file, load_str, parse_line, LoadReport, Record};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
