use hostel_client::{raw::fees, Attachment, Context};
use hostel_shared::fee::{handle::FeeDescriptor, Fee, FeeStatus, FeeSummary};

use super::{Listing, Page};
use crate::{guard, Error};

/// A manager's monthly platform fees: what is owed, and what was paid.
pub struct ManagerFees {
    cx: Context,
    /// Pending summary rows, as calculated by the server.
    listing: Listing<FeeSummary>,
    history: Listing<Fee>,
}

impl ManagerFees {
    pub fn new(cx: Context) -> Result<Self, Error> {
        guard::require(&cx.session, guard::Route::ManagerFees)?;
        Ok(Self {
            cx,
            listing: Listing::default(),
            history: Listing::default(),
        })
    }

    /// Submitted fees with their review status.
    pub fn history(&self) -> &[Fee] {
        self.history.items()
    }

    /// Summary rows with no fee submitted yet.
    pub fn outstanding(&self) -> Vec<&FeeSummary> {
        self.listing.items().iter().filter(|s| !s.submitted).collect()
    }

    /// Pays the fee of one summary row.
    pub async fn pay(&mut self, summary: &FeeSummary, proof_image: Attachment) -> Result<Fee, Error> {
        self.submit(summary.into(), proof_image).await
    }

    pub async fn submit(
        &mut self,
        descriptor: FeeDescriptor,
        proof_image: Attachment,
    ) -> Result<Fee, Error> {
        if descriptor.hostel_id.trim().is_empty() {
            return Err(Error::InvalidInput("Select a hostel"));
        }

        tracing::info!(hostel = %descriptor.hostel_id, month = %descriptor.month, amount = descriptor.fee_amount, "submitting fee");
        let result = self
            .cx
            .call(fees::Submit {
                descriptor,
                proof_image,
            })
            .await;
        self.settle(result, "Failed to submit fee").await
    }
}

#[async_trait::async_trait]
impl Page for ManagerFees {
    type Item = FeeSummary;
    const LOAD_FALLBACK: &'static str = "Failed to load fee summary";

    fn listing(&self) -> &Listing<FeeSummary> {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing<FeeSummary> {
        &mut self.listing
    }

    async fn fetch(&self) -> anyhow::Result<Vec<FeeSummary>> {
        self.cx.call(fees::PendingSummary).await
    }

    async fn load(&mut self) -> Result<(), Error> {
        let summary = self.cx.call(fees::PendingSummary).await;
        let summary = self.listing.apply(summary, Self::LOAD_FALLBACK);

        let history = self.cx.call(fees::Mine).await;
        let history = self.history.apply(history, "Failed to load fee history");
        if let Err(ref err) = history {
            // one banner per page
            self.listing.banner.get_or_insert_with(|| err.to_string());
        }

        summary.and(history)
    }
}

/// Fees awaiting (or past) an admin's review.
pub struct AdminFees {
    cx: Context,
    /// Server-side status selection, pending by default.
    pub status: Option<FeeStatus>,
    listing: Listing<Fee>,
}

impl AdminFees {
    pub fn new(cx: Context) -> Result<Self, Error> {
        guard::require(&cx.session, guard::Route::AdminFees)?;
        Ok(Self {
            cx,
            status: Some(FeeStatus::Pending),
            listing: Listing::default(),
        })
    }

    /// Sum of the listed fees' amounts.
    pub fn total_amount(&self) -> u64 {
        self.listing
            .items()
            .iter()
            .map(|f| f.fee_amount as u64)
            .sum()
    }

    pub async fn approve(&mut self, fee: &str, remarks: Option<String>) -> Result<Fee, Error> {
        self.review(fee, FeeStatus::Approved, remarks).await
    }

    pub async fn reject(&mut self, fee: &str, remarks: Option<String>) -> Result<Fee, Error> {
        self.review(fee, FeeStatus::Rejected, remarks).await
    }

    async fn review(
        &mut self,
        fee: &str,
        status: FeeStatus,
        remarks: Option<String>,
    ) -> Result<Fee, Error> {
        tracing::info!(fee, ?status, "reviewing fee");
        let result = self
            .cx
            .call(fees::Review {
                fee: fee.to_owned(),
                status,
                remarks,
            })
            .await;
        self.settle(result, "Failed to review fee").await
    }
}

#[async_trait::async_trait]
impl Page for AdminFees {
    type Item = Fee;
    const LOAD_FALLBACK: &'static str = "Failed to load fees";

    fn listing(&self) -> &Listing<Fee> {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing<Fee> {
        &mut self.listing
    }

    async fn fetch(&self) -> anyhow::Result<Vec<Fee>> {
        self.cx
            .call(fees::List {
                status: self.status,
            })
            .await
    }
}
