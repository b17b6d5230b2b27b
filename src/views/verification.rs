use hostel_client::{raw::verifications, Attachment, Context};
use hostel_shared::verification::{
    handle::VerificationDescriptor, ManagerVerification, VerificationStatus,
};

use super::{required, Listing, Page};
use crate::{guard, Error};

/// A manager's own verification status and submission form.
pub struct ManagerVerificationPage {
    cx: Context,
    /// Holds at most the manager's latest verification.
    listing: Listing<ManagerVerification>,
}

impl ManagerVerificationPage {
    pub fn new(cx: Context) -> Result<Self, Error> {
        guard::require(&cx.session, guard::Route::ManagerVerification)?;
        Ok(Self {
            cx,
            listing: Listing::default(),
        })
    }

    pub fn current(&self) -> Option<&ManagerVerification> {
        self.listing.items().first()
    }

    pub fn status(&self) -> Option<VerificationStatus> {
        self.current().map(|v| v.status)
    }

    /// Hostel management opens once an admin approved the verification.
    pub fn can_list_hostels(&self) -> bool {
        self.status() == Some(VerificationStatus::Approved)
    }

    /// The form is shown when nothing was submitted yet or the last
    /// submission was rejected.
    pub fn can_submit(&self) -> bool {
        matches!(self.status(), None | Some(VerificationStatus::Rejected))
    }

    pub async fn submit(
        &mut self,
        descriptor: VerificationDescriptor,
        building_images: Vec<Attachment>,
    ) -> Result<ManagerVerification, Error> {
        required(&descriptor.owner_name, "Owner name is required")?;
        required(&descriptor.city, "City is required")?;
        required(&descriptor.address, "Address is required")?;
        required(
            &descriptor.payment_details.account_number,
            "Account number is required",
        )?;
        if building_images.is_empty() {
            return Err(Error::InvalidInput("Attach at least one building image"));
        }

        tracing::info!(images = building_images.len(), "submitting verification");
        let result = self
            .cx
            .call(verifications::Submit {
                descriptor,
                building_images,
            })
            .await;
        self.settle(result, "Failed to submit verification").await
    }
}

#[async_trait::async_trait]
impl Page for ManagerVerificationPage {
    type Item = ManagerVerification;
    const LOAD_FALLBACK: &'static str = "Failed to load verification status";

    fn listing(&self) -> &Listing<ManagerVerification> {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing<ManagerVerification> {
        &mut self.listing
    }

    async fn fetch(&self) -> anyhow::Result<Vec<ManagerVerification>> {
        Ok(self
            .cx
            .call(verifications::Mine)
            .await?
            .into_iter()
            .collect())
    }
}

/// Verifications awaiting (or past) an admin's review.
pub struct AdminVerifications {
    cx: Context,
    /// Server-side status selection, pending by default.
    pub status: Option<VerificationStatus>,
    listing: Listing<ManagerVerification>,
}

impl AdminVerifications {
    pub fn new(cx: Context) -> Result<Self, Error> {
        guard::require(&cx.session, guard::Route::AdminVerifications)?;
        Ok(Self {
            cx,
            status: Some(VerificationStatus::Pending),
            listing: Listing::default(),
        })
    }

    pub async fn approve(
        &mut self,
        verification: &str,
        remarks: Option<String>,
    ) -> Result<ManagerVerification, Error> {
        self.review(verification, VerificationStatus::Approved, remarks)
            .await
    }

    pub async fn reject(
        &mut self,
        verification: &str,
        remarks: Option<String>,
    ) -> Result<ManagerVerification, Error> {
        self.review(verification, VerificationStatus::Rejected, remarks)
            .await
    }

    async fn review(
        &mut self,
        verification: &str,
        status: VerificationStatus,
        remarks: Option<String>,
    ) -> Result<ManagerVerification, Error> {
        tracing::info!(verification, ?status, "reviewing verification");
        let result = self
            .cx
            .call(verifications::Review {
                verification: verification.to_owned(),
                status,
                remarks,
            })
            .await;
        self.settle(result, "Failed to review verification").await
    }
}

#[async_trait::async_trait]
impl Page for AdminVerifications {
    type Item = ManagerVerification;
    const LOAD_FALLBACK: &'static str = "Failed to load verifications";

    fn listing(&self) -> &Listing<ManagerVerification> {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing<ManagerVerification> {
        &mut self.listing
    }

    async fn fetch(&self) -> anyhow::Result<Vec<ManagerVerification>> {
        self.cx
            .call(verifications::List {
                status: self.status,
            })
            .await
    }
}
