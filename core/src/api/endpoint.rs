//! Endpoint and query model for the camera web service

use reqwest::Method;
use std::fmt;
use std::str::FromStr;

/// Sentinel the camera receives when a delete is confirmed with no row staged
pub const UNSET_INDEX_SENTINEL: &str = "NaN";

/// Which stored picture a request refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureIndex {
    /// The most recently captured picture (`index=-1` on the wire)
    Latest,
    /// A specific stored picture
    At(u32),
}

impl fmt::Display for PictureIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PictureIndex::Latest => write!(f, "-1"),
            PictureIndex::At(index) => write!(f, "{}", index),
        }
    }
}

impl FromStr for PictureIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "latest" | "last" | "-1" => Ok(PictureIndex::Latest),
            other => other
                .parse::<u32>()
                .map(PictureIndex::At)
                .map_err(|_| format!("'{}' is not a picture index (use a number or 'latest')", other)),
        }
    }
}

/// Query for `GET /picture`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PictureQuery {
    pub index: PictureIndex,
    /// Ask the server to send the picture as an attachment
    pub download: bool,
}

impl PictureQuery {
    pub fn new(index: PictureIndex, download: bool) -> Self {
        Self { index, download }
    }

    /// Most recent picture, forced download
    pub fn latest_download() -> Self {
        Self::new(PictureIndex::Latest, true)
    }

    fn query_string(&self) -> String {
        if self.download {
            format!("index={}&download=true", self.index)
        } else {
            format!("index={}", self.index)
        }
    }
}

/// Index sent with `DELETE /delete`
///
/// Coerced from the pending-delete state: an unset index is sent verbatim as
/// [`UNSET_INDEX_SENTINEL`] and left for the server to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteIndex {
    Row(u32),
    Unset,
}

impl From<Option<u32>> for DeleteIndex {
    fn from(pending: Option<u32>) -> Self {
        match pending {
            Some(index) => DeleteIndex::Row(index),
            None => DeleteIndex::Unset,
        }
    }
}

impl fmt::Display for DeleteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteIndex::Row(index) => write!(f, "{}", index),
            DeleteIndex::Unset => f.write_str(UNSET_INDEX_SENTINEL),
        }
    }
}

/// Every route of the camera service this client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `POST /picture`
    Capture,
    /// `GET /picture?index=..[&download=true]`
    Picture(PictureQuery),
    /// `DELETE /delete?index=..`
    Delete(DeleteIndex),
    /// `DELETE /deleteAll`
    DeleteAll,
    /// `GET /files`
    Files,
    /// `GET /downloadAll`
    DownloadAll,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Capture => Method::POST,
            Endpoint::Delete(_) | Endpoint::DeleteAll => Method::DELETE,
            Endpoint::Picture(_) | Endpoint::Files | Endpoint::DownloadAll => Method::GET,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Capture | Endpoint::Picture(_) => "/picture",
            Endpoint::Delete(_) => "/delete",
            Endpoint::DeleteAll => "/deleteAll",
            Endpoint::Files => "/files",
            Endpoint::DownloadAll => "/downloadAll",
        }
    }

    pub fn query(&self) -> Option<String> {
        match self {
            Endpoint::Picture(query) => Some(query.query_string()),
            Endpoint::Delete(index) => Some(format!("index={}", index)),
            _ => None,
        }
    }

    /// Path plus query, e.g. `/picture?index=-1&download=true`
    pub fn uri(&self) -> String {
        match self.query() {
            Some(query) => format!("{}?{}", self.path(), query),
            None => self.path().to_string(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.uri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_uris() {
        assert_eq!(Endpoint::Capture.to_string(), "POST /picture");
        assert_eq!(
            Endpoint::Picture(PictureQuery::latest_download()).uri(),
            "/picture?index=-1&download=true"
        );
        assert_eq!(
            Endpoint::Picture(PictureQuery::new(PictureIndex::At(7), false)).uri(),
            "/picture?index=7"
        );
        assert_eq!(Endpoint::DeleteAll.to_string(), "DELETE /deleteAll");
        assert_eq!(Endpoint::Files.uri(), "/files");
    }

    #[test]
    fn test_delete_index_coercion() {
        assert_eq!(Endpoint::Delete(Some(3).into()).uri(), "/delete?index=3");
        assert_eq!(Endpoint::Delete(None.into()).uri(), "/delete?index=NaN");
    }

    #[test]
    fn test_parse_picture_index() {
        assert_eq!("latest".parse::<PictureIndex>(), Ok(PictureIndex::Latest));
        assert_eq!("-1".parse::<PictureIndex>(), Ok(PictureIndex::Latest));
        assert_eq!("12".parse::<PictureIndex>(), Ok(PictureIndex::At(12)));
        assert!("-2".parse::<PictureIndex>().is_err());
        assert!("abc".parse::<PictureIndex>().is_err());
    }
}
