/// Longest body excerpt kept in error messages.
const BODY_EXCERPT: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Transport(#[from] curl::Error),

    #[error("GET {url} returned HTTP {status}, expected {expected}: {}", excerpt(.body))]
    UnexpectedStatus {
        url: String,
        expected: u32,
        status: u32,
        body: String,
    },

    #[error("GET {url} body does not contain '{expected}': {}", excerpt(.body))]
    UnexpectedBody {
        url: String,
        expected: String,
        body: String,
    },

    #[error("GET {url} rejected: {reason}")]
    Rejected { url: String, reason: String },
}

impl HttpError {
    /// Errors that retrying cannot fix: the request can never be made.
    pub fn is_fatal(&self) -> bool {
        match self {
            HttpError::InvalidUrl { .. } => true,
            HttpError::Transport(e) => e.is_url_malformed() || e.is_unsupported_protocol(),
            _ => false,
        }
    }
}

fn excerpt(body: &str) -> &str {
    let trimmed = body.trim();
    if trimmed.len() <= BODY_EXCERPT {
        return trimmed;
    }
    let mut end = BODY_EXCERPT;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    &trimmed[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(1000);
        let err = HttpError::UnexpectedStatus {
            url: "http://h/".to_string(),
            expected: 200,
            status: 503,
            body,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("GET http://h/ returned HTTP 503, expected 200: xxx"));
        assert!(msg.len() < 300);
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        let body = "é".repeat(150);
        assert!(excerpt(&body).len() <= BODY_EXCERPT);
    }

    #[test]
    fn only_invalid_urls_are_fatal() {
        assert!(HttpError::InvalidUrl {
            url: "x".to_string(),
            reason: "bad".to_string()
        }
        .is_fatal());
        assert!(!HttpError::Rejected {
            url: "x".to_string(),
            reason: "not yet".to_string()
        }
        .is_fatal());
    }
}
