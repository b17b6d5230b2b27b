use hostel_client::{raw::hostels, Attachment, Context};
use hostel_shared::{
    hostel::{
        handle::{EditHostelDescriptor, HostelDescriptor, HostelQuery},
        Hostel,
    },
    HostelFor,
};

use super::{required, Listing, Page};
use crate::{guard, Error};

/// Client-side narrowing of the fetched hostel list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostelFilter {
    pub city: Option<String>,
    pub hostel_type: Option<HostelFor>,
    /// Only hostels offering this room type.
    pub room_type: Option<String>,
    /// Only hostels with a room at or below this monthly price.
    pub max_price: Option<u32>,
    pub vacancy_only: bool,
}

impl HostelFilter {
    pub fn matches(&self, hostel: &Hostel) -> bool {
        if let Some(ref city) = self.city {
            if !hostel.city.eq_ignore_ascii_case(city) {
                return false;
            }
        }

        if self.hostel_type.map_or(false, |t| t != hostel.hostel_type) {
            return false;
        }

        let rooms: Vec<_> = match self.room_type {
            Some(ref room_type) => hostel.pricing_for(room_type).into_iter().collect(),
            None => hostel.pricing.iter().collect(),
        };

        if self.room_type.is_some() && rooms.is_empty() {
            return false;
        }

        if let Some(max) = self.max_price {
            if !rooms.iter().any(|p| p.price_per_month <= max) {
                return false;
            }
        }

        !self.vacancy_only || rooms.iter().any(|p| p.available_rooms > 0)
    }
}

/// The public hostel list.
pub struct HostelBrowser {
    cx: Context,
    /// Sent to the server on every load.
    pub query: HostelQuery,
    /// Applied over the fetched list.
    pub filter: HostelFilter,
    listing: Listing<Hostel>,
}

impl HostelBrowser {
    pub fn new(cx: Context) -> Self {
        Self {
            cx,
            query: HostelQuery::default(),
            filter: HostelFilter::default(),
            listing: Listing::default(),
        }
    }

    /// Hostels passing the current filter.
    pub fn visible(&self) -> Vec<&Hostel> {
        self.listing
            .items()
            .iter()
            .filter(|h| self.filter.matches(h))
            .collect()
    }

    /// Distinct cities of the fetched list, for the city selector.
    pub fn cities(&self) -> Vec<String> {
        let mut cities: Vec<String> = self
            .listing
            .items()
            .iter()
            .map(|h| h.city.clone())
            .collect();
        cities.sort_unstable_by_key(|c| c.to_lowercase());
        cities.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
        cities
    }

    /// Fetches one hostel for its detail page.
    pub async fn detail(&mut self, hostel: &str) -> Result<Hostel, Error> {
        self.cx
            .call(hostels::Get {
                hostel: hostel.to_owned(),
            })
            .await
            .map_err(|err| self.listing.fail(err, "Failed to load hostel"))
    }
}

#[async_trait::async_trait]
impl Page for HostelBrowser {
    type Item = Hostel;
    const LOAD_FALLBACK: &'static str = "Failed to load hostels";

    fn listing(&self) -> &Listing<Hostel> {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing<Hostel> {
        &mut self.listing
    }

    async fn fetch(&self) -> anyhow::Result<Vec<Hostel>> {
        self.cx
            .call(hostels::List {
                query: self.query.clone(),
            })
            .await
    }
}

/// A verified manager's own hostels.
pub struct ManagerHostels {
    cx: Context,
    listing: Listing<Hostel>,
}

impl ManagerHostels {
    pub fn new(cx: Context) -> Result<Self, Error> {
        guard::require(&cx.session, guard::Route::ManagerHostels)?;
        Ok(Self {
            cx,
            listing: Listing::default(),
        })
    }

    pub async fn create(
        &mut self,
        descriptor: HostelDescriptor,
        images: Vec<Attachment>,
    ) -> Result<Hostel, Error> {
        required(&descriptor.hostel_name, "Hostel name is required")?;
        required(&descriptor.city, "City is required")?;
        required(&descriptor.address, "Address is required")?;
        if descriptor.pricing.is_empty() {
            return Err(Error::InvalidInput("Add at least one room type"));
        }

        tracing::info!(name = %descriptor.hostel_name, images = images.len(), "creating hostel");
        let result = self.cx.call(hostels::Create { descriptor, images }).await;
        self.settle(result, "Failed to create hostel").await
    }

    pub async fn edit(
        &mut self,
        hostel: &str,
        descriptor: EditHostelDescriptor,
    ) -> Result<Hostel, Error> {
        let result = self
            .cx
            .call(hostels::Edit {
                hostel: hostel.to_owned(),
                descriptor,
            })
            .await;
        self.settle(result, "Failed to update hostel").await
    }

    pub async fn delete(&mut self, hostel: &str) -> Result<(), Error> {
        tracing::info!(hostel, "deleting hostel");
        let result = self
            .cx
            .call(hostels::Delete {
                hostel: hostel.to_owned(),
            })
            .await;
        self.settle(result, "Failed to delete hostel").await
    }
}

#[async_trait::async_trait]
impl Page for ManagerHostels {
    type Item = Hostel;
    const LOAD_FALLBACK: &'static str = "Failed to load your hostels";

    fn listing(&self) -> &Listing<Hostel> {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing<Hostel> {
        &mut self.listing
    }

    async fn fetch(&self) -> anyhow::Result<Vec<Hostel>> {
        self.cx.call(hostels::Mine).await
    }
}
