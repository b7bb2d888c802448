//! Error types for the settlement engine

use thiserror::Error;

/// Result type for settlement operations
pub type Result<T> = std::result::Result<T, Error>;

/// Settlement errors
///
/// Every variant except `Config` and `Io` is a caller-input error detected before the
/// greedy matching runs. The matching loop itself cannot fail.
#[derive(Error, Debug)]
pub enum Error {
    /// Request body has the wrong shape (not a list, member not an object, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Member without an id, or with an empty one
    #[error("Invalid member format: each member must have a non-empty id (string)")]
    MissingId,

    /// Member whose net is absent or not a number
    #[error("Invalid member format: net for member {id} must be a number")]
    InvalidNet {
        /// Offending member
        id: String,
    },

    /// Member whose net is NaN or infinite
    #[error("Invalid net amount for member {id}: must be a finite number")]
    NonFiniteNet {
        /// Offending member
        id: String,
    },

    /// The same id appears more than once
    #[error("Duplicate member ID found: {0}")]
    DuplicateId(String),

    /// Group is larger than the configured limit
    #[error("Too many members: {count} exceeds the limit of {max}")]
    TooManyMembers {
        /// Members supplied
        count: usize,
        /// Configured maximum
        max: usize,
    },

    /// Net amount does not fit in the subunit representation
    #[error("Net amount for member {id} is out of range")]
    AmountOutOfRange {
        /// Offending member
        id: String,
    },

    /// Balances do not net to zero and the imbalance policy is `reject`
    #[error("Balances do not net to zero: creditors {creditor_total}, debtors {debtor_total}")]
    Unbalanced {
        /// Sum of creditor balances
        creditor_total: String,
        /// Sum of debtor balances
        debtor_total: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error was caused by the caller's input rather than the environment
    pub fn is_validation(&self) -> bool {
        !matches!(self, Error::Config(_) | Error::Io(_))
    }
}
