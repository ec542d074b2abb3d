use std::fmt;

use crate::key::ModalKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalError {
    /// The key was never passed to `register`.
    NotRegistered(ModalKey),
    LockPoisoned(&'static str),
    /// Props must be a JSON object.
    InvalidProps(String),
    /// A completed interaction value did not match the requested type.
    Decode(String),
}

impl fmt::Display for ModalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalError::NotRegistered(key) => write!(f, "modal '{}' is not registered", key),
            ModalError::LockPoisoned(operation) => {
                write!(f, "modal store lock poisoned during {}", operation)
            }
            ModalError::InvalidProps(msg) => write!(f, "invalid modal props: {}", msg),
            ModalError::Decode(msg) => write!(f, "interaction result decode error: {}", msg),
        }
    }
}

impl std::error::Error for ModalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_key() {
        let err = ModalError::NotRegistered(ModalKey::from("confirm"));
        assert_eq!(err.to_string(), "modal 'confirm' is not registered");
    }

    #[test]
    fn display_lock_poisoned() {
        let err = ModalError::LockPoisoned("open");
        assert_eq!(err.to_string(), "modal store lock poisoned during open");
    }
}
