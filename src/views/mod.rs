//! Page state for every workflow of the marketplace.
//!
//! Every page fetches its list when opened, filters it locally, and
//! after each submission reloads the list from the server. Nothing is
//! updated ahead of the server's answer. A failed call leaves the
//! previous list in place and shows the server's message in a banner.

pub mod bookings;
pub mod chat;
pub mod fees;
pub mod hostels;
pub mod reports;
pub mod reservations;
pub mod users;
pub mod verification;

use crate::Error;

/// The last fetched list of a page plus its error banner.
#[derive(Debug)]
pub struct Listing<T> {
    items: Vec<T>,
    banner: Option<String>,
    loaded: bool,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            banner: None,
            loaded: false,
        }
    }
}

impl<T> Listing<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Whether a fetch ever succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Takes a fetch result: replaces the list on success,
    /// keeps it and raises the banner on failure.
    pub(crate) fn apply(
        &mut self,
        result: anyhow::Result<Vec<T>>,
        fallback: &str,
    ) -> Result<(), Error> {
        match result {
            Ok(items) => {
                self.items = items;
                self.banner = None;
                self.loaded = true;
                Ok(())
            }
            Err(err) => Err(self.fail(err, fallback)),
        }
    }

    /// Raises the banner for a failed call.
    pub(crate) fn fail(&mut self, err: anyhow::Error, fallback: &str) -> Error {
        let err = Error::request(err, fallback);
        tracing::warn!(error = %err, "call failed");
        self.banner = Some(err.to_string());
        err
    }
}

/// A page backed by one server list.
#[async_trait::async_trait]
pub trait Page: Send {
    type Item: Send;

    /// Shown when loading fails without a server message.
    const LOAD_FALLBACK: &'static str;

    fn listing(&self) -> &Listing<Self::Item>;

    fn listing_mut(&mut self) -> &mut Listing<Self::Item>;

    async fn fetch(&self) -> anyhow::Result<Vec<Self::Item>>;

    /// Fetches the list, as on opening the page.
    async fn load(&mut self) -> Result<(), Error> {
        let result = self.fetch().await;
        self.listing_mut().apply(result, Self::LOAD_FALLBACK)
    }

    /// Finishes a submission: reload on success, banner on failure.
    ///
    /// A failed reload after a successful submission only raises the
    /// banner; the submission's output is still returned.
    async fn settle<O: Send>(&mut self, result: anyhow::Result<O>, fallback: &str) -> Result<O, Error> {
        match result {
            Ok(output) => {
                let _ = self.load().await;
                Ok(output)
            }
            Err(err) => Err(self.listing_mut().fail(err, fallback)),
        }
    }

    fn items(&self) -> &[Self::Item] {
        self.listing().items()
    }

    fn banner(&self) -> Option<&str> {
        self.listing().banner()
    }
}

/// Rejects blank required form fields.
pub(crate) fn required(value: &str, err: &'static str) -> Result<(), Error> {
    if value.trim().is_empty() {
        Err(Error::InvalidInput(err))
    } else {
        Ok(())
    }
}
