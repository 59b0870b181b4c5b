//! Domain error types.

/// A field-level validation failure raised while constructing a model value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(field, "missing value")
    }
}

/// Top-level error type for tradekit.
#[derive(Debug, thiserror::Error)]
pub enum TradekitError {
    #[error("data unavailable for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid record for {symbol} at line {line}: {source}")]
    InvalidRecord {
        symbol: String,
        line: u64,
        #[source]
        source: ValidationError,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TradekitError {
    pub fn data_unavailable(symbol: &str, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    pub fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn config_missing(section: &str, key: &str) -> Self {
        Self::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }
    }

    /// Process exit status reported by the CLI for this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            TradekitError::Io(_) => 1,
            TradekitError::ConfigParse { .. }
            | TradekitError::ConfigMissing { .. }
            | TradekitError::ConfigInvalid { .. } => 2,
            TradekitError::Validation(_) | TradekitError::InvalidRecord { .. } => 3,
            TradekitError::DataUnavailable { .. } => 4,
        }
    }
}

impl From<&TradekitError> for std::process::ExitCode {
    fn from(err: &TradekitError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_message_names_field() {
        let err = ValidationError::new("close", "must be positive");
        assert_eq!(err.to_string(), "invalid close: must be positive");
    }

    #[test]
    fn invalid_record_message_includes_line() {
        let err = TradekitError::InvalidRecord {
            symbol: "ABC".into(),
            line: 7,
            source: ValidationError::missing("volume"),
        };
        assert_eq!(
            err.to_string(),
            "invalid record for ABC at line 7: invalid volume: missing value"
        );
    }

    #[test]
    fn exit_status_groups() {
        assert_eq!(
            TradekitError::Io(std::io::Error::other("boom")).exit_status(),
            1
        );
        assert_eq!(TradekitError::config_missing("run", "symbol").exit_status(), 2);
        assert_eq!(
            TradekitError::config_invalid("strategy", "quantity", "bad").exit_status(),
            2
        );
        assert_eq!(
            TradekitError::from(ValidationError::missing("symbol")).exit_status(),
            3
        );
        assert_eq!(
            TradekitError::data_unavailable("ABC", "offline").exit_status(),
            4
        );
    }
}
