use std::{borrow::Cow, path::PathBuf};

use thiserror::Error;

/// An error while capturing CPU counters.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The counter source could not be opened or read.
    #[error("unable to read CPU counters from '{}': {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The counter source was read, but did not look like we expected.
    #[error("malformed CPU counters: {0}")]
    MalformedData(Cow<'static, str>),
}

impl CollectionError {
    pub(crate) fn malformed<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        CollectionError::MalformedData(reason.into())
    }
}

/// A [`Result`] with the error type being a [`CollectionError`].
pub type CollectionResult<T> = Result<T, CollectionError>;
