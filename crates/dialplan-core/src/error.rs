//! Error types shared by every stage of a run
//!
//! Both kinds are fatal: a run that hits one aborts without partial output
//! being trusted.

/// A source row or table that cannot be turned into index entries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("Invalid area code '{code}': {reason}")]
    InvalidCode { code: String, reason: String },
}

/// Settings that make generation or resolution impossible
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error(
        "Area code '{code}' has {code_len} digits but numbers are {total_length} digits long; \
         the total length must exceed every area code"
    )]
    LengthTooShort {
        code: String,
        code_len: usize,
        total_length: usize,
    },

    #[error(
        "Gave up generating a number for area code '{code}' after {attempts} attempts: \
         every padding collided with a longer area code"
    )]
    RetriesExhausted { code: String, attempts: u32 },

    #[error("Invalid prefix window {min}..={max}: lengths must be positive and min <= max")]
    InvalidWindow { min: usize, max: usize },

    #[error("Invalid setting '{name}': {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_name_the_code() {
        let err = ConfigurationError::LengthTooShort {
            code: "2079".to_string(),
            code_len: 4,
            total_length: 4,
        };
        assert!(err.to_string().contains("'2079'"));

        let err = ConfigurationError::RetriesExhausted {
            code: "20".to_string(),
            attempts: 100,
        };
        assert!(err.to_string().contains("'20'"));
        assert!(err.to_string().contains("100 attempts"));
    }

    #[test]
    fn record_error_reports_line() {
        let err = RecordError::MalformedRow {
            line: 7,
            reason: "empty phone code".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed row at line 7: empty phone code");
    }
}
