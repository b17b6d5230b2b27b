use serde::{Deserialize, Serialize};

use crate::HostelFor;

/// Payload of `POST /verifications`, sent as the `data` field next to the building images.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDescriptor {
    pub owner_name: String,
    pub city: String,
    pub address: String,
    pub hostel_for: HostelFor,
    pub payment_details: super::PaymentDetails,
}

/// An admin's decision on a pending submission.
///
/// Shared by verification and fee reviews.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDescriptor<S> {
    pub status: S,
    pub remarks: Option<String>,
}
