use serde::{Deserialize, Serialize};

use crate::{account::User, hostel::Hostel, Id, Month, Record, Ref};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeStatus {
    Pending,
    Approved,
    Rejected,
}

/// A manager's monthly platform fee payment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    #[serde(rename = "_id", alias = "id")]
    pub id: Id,
    pub manager: Ref<User>,
    pub hostel: Ref<Hostel>,
    pub month: Month,
    pub student_count: u32,
    pub fee_amount: u32,
    #[serde(default)]
    pub proof_image: Option<String>,
    pub status: FeeStatus,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl Record for Fee {
    fn id(&self) -> &str {
        &self.id
    }
}

/// One row of `GET /fees/pending-summary`: what a hostel owes for a month,
/// as calculated by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeeSummary {
    pub hostel: Id,
    pub hostel_name: String,
    pub month: Month,
    pub student_count: u32,
    pub fee_per_student: u32,
    pub fee_amount: u32,
    /// A fee for this hostel and month already exists.
    #[serde(default)]
    pub submitted: bool,
}

pub mod handle {
    use serde::{Deserialize, Serialize};

    use crate::{Id, Month};

    /// Payload of `POST /fees`, sent as the `data` field next to the payment proof.
    #[derive(Serialize, Deserialize, Debug, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct FeeDescriptor {
        pub hostel_id: Id,
        pub month: Month,
        pub student_count: u32,
        pub fee_amount: u32,
    }

    impl From<&super::FeeSummary> for FeeDescriptor {
        fn from(summary: &super::FeeSummary) -> Self {
            Self {
                hostel_id: summary.hostel.clone(),
                month: summary.month,
                student_count: summary.student_count,
                fee_amount: summary.fee_amount,
            }
        }
    }
}
