use thiserror::Error;

pub type ModelResult<T> = Result<T, DebugFault>;

/// Failure reported by a debug model accessor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DebugFault {
    /// The target is unreachable, timed out, or gone.
    #[error("{message}")]
    Communication { disconnected: bool, message: String },
    /// The element no longer exists: object collected, frame popped or
    /// obsolete, marker deleted.
    #[error("stale reference: {0}")]
    StaleReference(String),
    #[error("not supported: {0}")]
    Unsupported(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("no suspended thread is available for evaluation")]
    NoContext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    Communication,
    StaleReference,
    Unsupported,
    Internal,
    NoContext,
}

impl DebugFault {
    pub fn disconnected(message: impl Into<String>) -> Self {
        Self::Communication {
            disconnected: true,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Communication {
            disconnected: false,
            message: message.into(),
        }
    }

    pub fn stale(message: impl Into<String>) -> Self {
        Self::StaleReference(message.into())
    }

    pub fn kind(&self) -> FaultKind {
        match self {
            DebugFault::Communication { .. } => FaultKind::Communication,
            DebugFault::StaleReference(_) => FaultKind::StaleReference,
            DebugFault::Unsupported(_) => FaultKind::Unsupported,
            DebugFault::Internal(_) => FaultKind::Internal,
            DebugFault::NoContext => FaultKind::NoContext,
        }
    }

    /// The connection to the target is gone for good; retrying any other
    /// accessor is pointless.
    pub fn is_unrecoverable(&self) -> bool {
        matches!(
            self,
            DebugFault::Communication {
                disconnected: true,
                ..
            }
        )
    }

    /// Classify a JDWP reply error code.
    pub fn from_jdwp_error_code(error_code: u16) -> Self {
        match VmErrorKind::from_jdwp_error_code(error_code) {
            Some(kind) => kind.into(),
            None => {
                tracing::debug!(
                    target: "nova.debug.model",
                    error_code,
                    "unclassified JDWP error code"
                );
                DebugFault::Internal(format!("JDWP command failed with error code {error_code}"))
            }
        }
    }
}

/// Runtime failures a VM connection can surface while inspecting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VmErrorKind {
    ClassNotPrepared,
    InconsistentDebugInfo,
    Internal,
    InvalidCodeIndex,
    InvalidLineNumber,
    InvalidStackFrame,
    NativeMethod,
    ObjectCollected,
    Timeout,
    VmDisconnected,
    VmMismatch,
    VmOutOfMemory,
    DuplicateRequest,
    InvalidRequestState,
    OperationRefused,
}

impl VmErrorKind {
    /// Map a JDWP `Error` constant to the VM failure it reports.
    ///
    /// Codes without a VM-level counterpart (argument validation, transport
    /// setup, class redefinition) return `None`.
    pub fn from_jdwp_error_code(error_code: u16) -> Option<Self> {
        Some(match error_code {
            // INVALID_OBJECT
            20 => VmErrorKind::ObjectCollected,
            // CLASS_NOT_PREPARED
            22 => VmErrorKind::ClassNotPrepared,
            // INVALID_LOCATION
            24 => VmErrorKind::InvalidCodeIndex,
            // INVALID_FRAMEID, NO_MORE_FRAMES, OPAQUE_FRAME
            30..=32 => VmErrorKind::InvalidStackFrame,
            // DUPLICATE
            40 => VmErrorKind::DuplicateRequest,
            // INVALID_EVENT_TYPE
            102 => VmErrorKind::InvalidRequestState,
            // OUT_OF_MEMORY
            110 => VmErrorKind::VmOutOfMemory,
            // ACCESS_DENIED
            111 => VmErrorKind::OperationRefused,
            // VM_DEAD
            112 => VmErrorKind::VmDisconnected,
            // INTERNAL
            113 => VmErrorKind::Internal,
            // NATIVE_METHOD
            511 => VmErrorKind::NativeMethod,
            _ => return None,
        })
    }
}

impl From<VmErrorKind> for DebugFault {
    fn from(kind: VmErrorKind) -> Self {
        match kind {
            VmErrorKind::VmDisconnected => DebugFault::disconnected("VM disconnected"),
            VmErrorKind::Timeout => DebugFault::timeout("timed out waiting for the VM"),
            VmErrorKind::VmOutOfMemory => DebugFault::timeout("VM is out of memory"),
            VmErrorKind::ObjectCollected => DebugFault::stale("object has been garbage collected"),
            VmErrorKind::InvalidStackFrame => DebugFault::stale("stack frame is no longer valid"),
            VmErrorKind::InvalidCodeIndex => DebugFault::stale("code index is no longer valid"),
            VmErrorKind::InvalidLineNumber => DebugFault::stale("line number is no longer valid"),
            VmErrorKind::NativeMethod => {
                DebugFault::Unsupported("operation is not available in native methods".to_string())
            }
            VmErrorKind::ClassNotPrepared => {
                DebugFault::Unsupported("class has not been prepared".to_string())
            }
            VmErrorKind::OperationRefused => {
                DebugFault::Unsupported("VM refused the operation".to_string())
            }
            VmErrorKind::InconsistentDebugInfo => {
                DebugFault::Internal("inconsistent debug information".to_string())
            }
            VmErrorKind::Internal => DebugFault::Internal("VM internal error".to_string()),
            VmErrorKind::VmMismatch => {
                DebugFault::Internal("mirror belongs to a different VM".to_string())
            }
            VmErrorKind::DuplicateRequest => {
                DebugFault::Internal("duplicate event request".to_string())
            }
            VmErrorKind::InvalidRequestState => {
                DebugFault::Internal("event request is in an invalid state".to_string())
            }
        }
    }
}
