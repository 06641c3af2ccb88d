//! Error type shared by the fetcher, the scrapers and the output writers.
//!
//! Only failures that stop a whole unit of work end up here: a page that
//! could not be downloaded, a config file that does not parse, an output
//! file that cannot be written. A selector or pattern that finds nothing is
//! not an error; resolvers return `None` for that.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mentions_url_and_code() {
        let err = ScrapeError::Status {
            url: "https://communicatie.vtm.be/x".to_string(),
            status: 503,
        };
        let msg = err.to_string();
        assert!(msg.contains("https://communicatie.vtm.be/x"));
        assert!(msg.contains("503"));
    }

    #[test]
    fn test_io_error_converts() {
        fn fails() -> Result<()> {
            Err::<(), _>(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(ScrapeError::Io(_))));
    }
}
