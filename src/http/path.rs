//! Request path decomposition
//!
//! Splits a request location such as `/app/wro/all.css` into the mapping
//! prefix (`/app`) and the path info below it (`/wro/all.css`).

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("location cannot be empty")]
    EmptyLocation,
}

/// Path info of a location: everything from the second `/` onwards
///
/// Returns an empty string when the location has a single segment.
///
/// # Examples
/// ```
/// use sass_bridge::http::path::path_info_from_location;
/// assert_eq!(path_info_from_location("/app/wro/all.css").unwrap(), "/wro/all.css");
/// assert_eq!(path_info_from_location("/app").unwrap(), "");
/// ```
pub fn path_info_from_location(location: &str) -> Result<&str, PathError> {
    let mut chars = location.chars();
    if chars.next().is_none() {
        return Err(PathError::EmptyLocation);
    }
    let rest = chars.as_str();
    Ok(rest.find('/').map_or("", |slash| &rest[slash..]))
}

/// Location with its path info removed, e.g. `/app/wro/all.css` -> `/app`
pub fn servlet_path_from_location(location: &str) -> Result<String, PathError> {
    let path_info = path_info_from_location(location)?;
    // Path info is always a suffix of the location
    Ok(location
        .strip_suffix(path_info)
        .unwrap_or(location)
        .to_string())
}

/// Folder part of a URI, up to and including the last separator
///
/// `/app/wro/all.css` gives `/app/wro/`; a bare file name gives `""`.
pub fn folder_of_uri(uri: &str) -> &str {
    uri.rfind(['/', '\\']).map_or("", |idx| &uri[..=idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_info() {
        assert_eq!(path_info_from_location("/app/wro/all.css"), Ok("/wro/all.css"));
        assert_eq!(path_info_from_location("/app/"), Ok("/"));
        assert_eq!(path_info_from_location("/app"), Ok(""));
        assert_eq!(path_info_from_location("/"), Ok(""));
    }

    #[test]
    fn test_path_info_empty_location() {
        assert_eq!(path_info_from_location(""), Err(PathError::EmptyLocation));
        assert_eq!(servlet_path_from_location(""), Err(PathError::EmptyLocation));
    }

    #[test]
    fn test_path_info_non_ascii_first_char() {
        assert_eq!(path_info_from_location("é/a/b"), Ok("/a/b"));
    }

    #[test]
    fn test_servlet_path() {
        assert_eq!(servlet_path_from_location("/app/wro/all.css").unwrap(), "/app");
        assert_eq!(servlet_path_from_location("/app").unwrap(), "/app");
        assert_eq!(servlet_path_from_location("/app/").unwrap(), "/app");
        assert_eq!(servlet_path_from_location("/a/b/a/b").unwrap(), "/a");
    }

    #[test]
    fn test_folder_of_uri() {
        assert_eq!(folder_of_uri("/app/wro/all.css"), "/app/wro/");
        assert_eq!(folder_of_uri("/app/wro/"), "/app/wro/");
        assert_eq!(folder_of_uri(r"C:\styles\main.scss"), r"C:\styles\");
        assert_eq!(folder_of_uri("all.css"), "");
        assert_eq!(folder_of_uri(""), "");
    }
}
