use std::fmt;

#[derive(Debug)]
pub enum DuelError {
    /// A target-selection session was started while one was already open.
    SessionAlreadyActive,
}

impl fmt::Display for DuelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuelError::SessionAlreadyActive => {
                write!(f, "A target-selection session is already active")
            }
        }
    }
}

impl std::error::Error for DuelError {}
