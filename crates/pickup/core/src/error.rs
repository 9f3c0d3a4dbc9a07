//! Common error infrastructure for pickup-core.
//!
//! Domain-specific errors (e.g. `TransferError`, `AgentError`) live next to the
//! operations that produce them. This module only holds the pieces they share.
//!
//! Missing optional resources (an absent curve, a dangling agent handle, a
//! missing sound cue) are never errors: the dependent computation is skipped
//! for that frame. Errors are reserved for caller mistakes and broken
//! invariants.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later (e.g. a gate is closed)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: unrecoverable errors, the simulation cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: item is not in a pickup-able state, slot index out of range
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: slot occupancy underflow (unpaired release)
    Internal,

    /// Fatal error - configuration or content is unusable.
    ///
    /// Examples: agent configured without any interp slot
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all pickup-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable strings suitable for logs and tests
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
