pub mod handle;

use serde::{Deserialize, Serialize};

use crate::{account::User, HostelFor, Id, Record, Ref};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

/// Where the platform sends refunds and where managers receive booking payments.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub account_title: String,
    pub account_number: String,
    pub bank_name: String,
}

/// A manager's request to be allowed to list hostels.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManagerVerification {
    #[serde(rename = "_id", alias = "id")]
    pub id: Id,
    pub manager: Ref<User>,
    pub owner_name: String,
    pub city: String,
    pub address: String,
    pub hostel_for: HostelFor,
    pub payment_details: PaymentDetails,
    #[serde(default)]
    pub building_images: Vec<String>,
    pub status: VerificationStatus,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Record for ManagerVerification {
    fn id(&self) -> &str {
        &self.id
    }
}
