use std::time::Duration;

/// Status recorded when no HTTP response could be obtained at all.
pub const TRANSPORT_FAILURE: u16 = 0;

/// The timed result of a single GET against `url`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestOutcome {
    pub url: String,
    pub status: u16,
    pub elapsed: Duration,
}

impl RequestOutcome {
    pub fn new(url: impl Into<String>, status: u16, elapsed: Duration) -> Self {
        Self {
            url: url.into(),
            status,
            elapsed,
        }
    }

    pub fn transport_failure(url: impl Into<String>, elapsed: Duration) -> Self {
        Self::new(url, TRANSPORT_FAILURE, elapsed)
    }

    /// 2xx only. The transport-failure sentinel is never a success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_2xx_is_success() {
        for status in 200..300 {
            let outcome = RequestOutcome::new("http://x", status, Duration::ZERO);
            assert!(outcome.is_success(), "status {} should be a success", status);
        }
    }

    #[test]
    fn test_everything_else_is_failure() {
        let failing = (0..200).chain(300..=u16::MAX);
        for status in failing {
            let outcome = RequestOutcome::new("http://x", status, Duration::ZERO);
            assert!(!outcome.is_success(), "status {} should be a failure", status);
        }
    }

    #[test]
    fn test_transport_failure_uses_sentinel() {
        let outcome = RequestOutcome::transport_failure("http://x", Duration::from_millis(3));
        assert_eq!(outcome.status, TRANSPORT_FAILURE);
        assert_eq!(outcome.elapsed, Duration::from_millis(3));
        assert!(!outcome.is_success());
    }
}
