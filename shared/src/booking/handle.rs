use serde::{Deserialize, Serialize};

use crate::Id;

/// Payload of `POST /bookings`, sent as the `data` field next to the transaction proof.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingDescriptor {
    pub hostel_id: Id,
    pub room_type: String,
    pub amount: u32,
}

/// Payload of `POST /bookings/:id/disapprove`, sent next to the refund evidence.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DisapproveDescriptor {
    pub reason: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct KickDescriptor {
    pub reason: String,
}
