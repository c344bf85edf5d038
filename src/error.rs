use thiserror::Error;

/// Failures that can abort tournament setup or reject a malformed bracket.
///
/// Combat itself has no error path: once a field of well-formed creatures is
/// assembled, attacks and matches are total functions.
#[derive(Debug, Error)]
pub enum TournamentError {
    /// The creature data service could not be reached. Carries a message
    /// rather than a transport error so any source implementation can
    /// produce it.
    #[error("creature data service unavailable: {0}")]
    DataUnavailable(String),

    /// The data service answered, but the payload was missing expected
    /// fields or carried values we could not interpret.
    #[error("malformed creature data: {0}")]
    MalformedData(String),

    /// A stage or field size that cannot form a single-elimination bracket.
    #[error("invalid tournament field size: {0}")]
    InvalidFieldSize(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let unavailable = TournamentError::DataUnavailable("connection refused".to_string());
        assert_eq!(
            unavailable.to_string(),
            "creature data service unavailable: connection refused"
        );
        let malformed = TournamentError::MalformedData("missing 'speed' stat".to_string());
        assert_eq!(
            malformed.to_string(),
            "malformed creature data: missing 'speed' stat"
        );
        let size = TournamentError::InvalidFieldSize(6);
        assert_eq!(size.to_string(), "invalid tournament field size: 6");
    }
}
