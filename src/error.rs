use thiserror::Error;

/// Failures surfaced by the page-automation layer. All of these are
/// transient: a stale element or a missed selector on one scrape says
/// nothing about the next one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageError {
    #[error("element not found: {0}")]
    ElementNotFound(String),
    #[error("interaction failed: {0}")]
    Interaction(String),
    #[error("navigation failed: {0}")]
    Navigation(String),
}

#[derive(Error, Debug)]
pub enum ScoutError {
    /// No recognizable chess figures on the page. Distinct from an empty
    /// board, which is not a valid game state and is never reported as one.
    #[error("no chess figures were found on the page")]
    BoardNotFound,

    /// The login flow did not leave the login page.
    #[error("authorization to {0} failed")]
    Authorization(String),

    /// The oracle produced no moves for the side to move.
    #[error("no moves available for {0}")]
    NoMoves(&'static str),

    #[error(transparent)]
    Page(#[from] PageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_error_wraps_into_scout_error() {
        let err: ScoutError = PageError::ElementNotFound("#board".to_string()).into();
        assert!(matches!(err, ScoutError::Page(_)));
    }

    #[test]
    fn test_board_not_found_message() {
        let msg = ScoutError::BoardNotFound.to_string();
        assert!(msg.contains("no chess figures"));
    }
}
