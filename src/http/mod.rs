//! HTTP helper module
//!
//! Stateless helpers used around asset serving, independent of the Sass
//! bridge: header dates, request path splitting, content negotiation and
//! text cleanup.

pub mod date;
pub mod header;
pub mod path;
pub mod text;

// Re-export commonly used functions
pub use date::to_date_as_string;
pub use header::{header_contains, is_gzip_supported, starts_with_ignore_case};
pub use path::{
    folder_of_uri, path_info_from_location, servlet_path_from_location, PathError,
};
pub use text::{is_empty_line, strip_empty_lines};
