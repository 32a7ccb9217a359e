//! Resource ceilings applied by every validator.

use serde::{Deserialize, Serialize};

/// Bounds on recursion and on externally originated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum nesting depth of constraint trees and argument inference.
    pub max_depth: usize,
    /// Maximum length of a name embedded in an error message.
    pub max_message_length: usize,
    /// Maximum size of a base64-encoded operator payload.
    pub max_operator_payload: usize,
}

impl Limits {
    pub const DEFAULT_MAX_DEPTH: usize = 100;
    pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 256;
    pub const DEFAULT_MAX_OPERATOR_PAYLOAD: usize = 64;

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_message_length: Self::DEFAULT_MAX_MESSAGE_LENGTH,
            max_operator_payload: Self::DEFAULT_MAX_OPERATOR_PAYLOAD,
        }
    }
}
