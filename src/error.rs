use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{metric}: reference must be {expected}")]
    InvalidInputType {
        metric: &'static str,
        expected: &'static str,
    },
    #[error("{metric}: {matches} matches reported for {boundaries} boundaries")]
    InconsistentComputation {
        metric: &'static str,
        matches: f64,
        boundaries: f64,
    },
    #[error("{metric}: rate is undefined ({reason})")]
    UndefinedRate {
        metric: &'static str,
        reason: String,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl MetricError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn invalid_input_type(metric: &'static str, expected: &'static str) -> Self {
        Self::InvalidInputType { metric, expected }
    }

    pub(crate) fn inconsistent(metric: &'static str, matches: f64, boundaries: f64) -> Self {
        Self::InconsistentComputation {
            metric,
            matches,
            boundaries,
        }
    }

    pub(crate) fn undefined_rate(metric: &'static str, reason: impl Into<String>) -> Self {
        Self::UndefinedRate {
            metric,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
