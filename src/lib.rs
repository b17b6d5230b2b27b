pub mod config;
pub mod guard;
pub mod views;

#[cfg(test)]
mod tests;

use std::time::Duration;

pub use hostel_client::{error_message, Attachment, Context, Session};
pub use hostel_shared as shared;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A call failed; the message is what the page shows.
    #[error("{message}")]
    Request {
        message: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("not logged in")]
    NotLoggedIn,
    #[error("permission denied")]
    PermissionDenied,
    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("config error: {0}")]
    Config(toml::de::Error),
    #[error("io error: {0}")]
    Io(std::io::Error),
}

impl Error {
    /// Wraps a failed call, resolving the message to show.
    pub fn request(source: anyhow::Error, fallback: &str) -> Self {
        if source.downcast_ref::<hostel_client::NotLoggedIn>().is_some() {
            return Self::NotLoggedIn;
        }

        Self::Request {
            message: error_message(&source, fallback),
            source,
        }
    }

    /// The status code the server rejected the call with.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request { source, .. } => {
                hostel_client::error_status(source).map(|status| status.as_u16())
            }
            _ => None,
        }
    }
}

/// Implements `From<T>` for [`Error`].
macro_rules! impl_from {
    ($($t:ty => $v:ident),* $(,)?) => {
        $(
            impl From<$t> for $crate::Error {
                #[inline]
                fn from(err: $t) -> Self {
                    Self::$v(err)
                }
            }
        )*
    };
}

impl_from! {
    toml::de::Error => Config,
    std::io::Error => Io,
}

/// Installs the global log subscriber at the configured level.
pub fn init_tracing() {
    let level = config::INSTANCE
        .log
        .level
        .parse()
        .unwrap_or(tracing::Level::INFO);

    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
}

/// Builds the application context from a config,
/// restoring the persisted session if there is one.
pub fn connect(config: &config::Config) -> Result<Context, Error> {
    let session = match config.session.path {
        Some(ref path) => Session::restore(path),
        None => Session::in_memory(),
    };

    Context::with_timeout(
        config.api.base_url.clone(),
        session,
        Duration::from_secs(config.api.timeout_secs),
    )
    .map_err(|err| Error::request(err, "failed to build http client"))
}
