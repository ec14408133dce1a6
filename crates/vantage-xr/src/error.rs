use thiserror::Error;

#[derive(Debug, Error)]
pub enum XrError {
    #[error("openxr call failed: {0}")]
    Runtime(String),
    #[error("required extension missing: {0}")]
    MissingExtension(&'static str),
    #[error("runtime reported {0} stereo views, expected 2")]
    ViewCount(usize),
    #[error("unsupported: {0}")]
    Unsupported(String),
    #[error("refresh rate {0} Hz not offered by runtime")]
    RateUnsupported(f32),
    #[error("refresh rate already {0} Hz")]
    RateUnchanged(f32),
    #[error(transparent)]
    Shell(#[from] vantage_shell::ShellError),
}

pub type Result<T> = std::result::Result<T, XrError>;

/// Maps a raw runtime result into `XrError::Runtime`, tagged with the
/// failing call.
pub(crate) fn runtime_err(what: &str, e: openxr::sys::Result) -> XrError {
    XrError::Runtime(format!("{what}: {e:?}"))
}
