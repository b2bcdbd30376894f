/// Configuration errors.
///
/// Resolution itself never fails: malformed declarations and unresolved imports are
/// omitted from results. Only profile identification and lookup can go wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid implementation profile identifier '{0}' (expected 'vendor/version')")]
    InvalidProfileId(String),
    #[error("unknown implementation profile '{0}'")]
    UnknownProfile(String),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
