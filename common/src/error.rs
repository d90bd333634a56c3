use thiserror::Error;

/// The fatal failure classes of a scan run.
///
/// Recoverable conditions never surface here: an unusable configuration
/// file falls back to defaults inside the loader, a failed hostname lookup
/// keeps the sentinel, and a scan with zero replies is an ordinary result.
#[derive(Debug, Error)]
pub enum Error {
    /// The host operating system is not one this tool has a capability
    /// set for.
    #[error("operating system could not be recognized")]
    UnsupportedPlatform,

    /// No interface could be selected, or the selected one could not be
    /// bound for raw transmission.
    #[error("interface could not be used: {0}")]
    InterfaceUnusable(String),

    /// The interface reported a netmask that is not four dotted octets
    /// in 0-255.
    #[error("subnet mask `{0}` could not be parsed")]
    MalformedMask(String),

    /// The user asked the run to end.
    #[error("interrupted by user")]
    Interrupted,
}
