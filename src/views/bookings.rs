use hostel_client::{raw::bookings, Attachment, Context};
use hostel_shared::booking::{handle::BookingDescriptor, Booking, BookingStatus};

use super::{required, Listing, Page};
use crate::{guard, Error};

/// A student's bookings.
pub struct StudentBookings {
    cx: Context,
    listing: Listing<Booking>,
}

impl StudentBookings {
    pub fn new(cx: Context) -> Result<Self, Error> {
        guard::require(&cx.session, guard::Route::StudentBookings)?;
        Ok(Self {
            cx,
            listing: Listing::default(),
        })
    }

    /// The booking the student currently holds, as last fetched.
    pub fn active(&self) -> Option<&Booking> {
        self.listing.items().iter().find(|b| b.status.is_active())
    }

    /// Books a room with proof of the transferred amount.
    pub async fn book(
        &mut self,
        descriptor: BookingDescriptor,
        transaction_image: Attachment,
    ) -> Result<Booking, Error> {
        required(&descriptor.hostel_id, "Select a hostel")?;
        required(&descriptor.room_type, "Select a room type")?;
        if descriptor.amount == 0 {
            return Err(Error::InvalidInput("Amount must be greater than zero"));
        }

        tracing::info!(hostel = %descriptor.hostel_id, room = %descriptor.room_type, "booking room");
        let result = self
            .cx
            .call(bookings::Create {
                descriptor,
                transaction_image,
            })
            .await;
        self.settle(result, "Failed to create booking").await
    }

    pub async fn leave(&mut self, booking: &str) -> Result<Booking, Error> {
        tracing::info!(booking, "leaving hostel");
        let result = self
            .cx
            .call(bookings::Leave {
                booking: booking.to_owned(),
            })
            .await;
        self.settle(result, "Failed to leave hostel").await
    }
}

#[async_trait::async_trait]
impl Page for StudentBookings {
    type Item = Booking;
    const LOAD_FALLBACK: &'static str = "Failed to load bookings";

    fn listing(&self) -> &Listing<Booking> {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing<Booking> {
        &mut self.listing
    }

    async fn fetch(&self) -> anyhow::Result<Vec<Booking>> {
        self.cx.call(bookings::Mine).await
    }
}

/// Bookings made for a manager's hostels.
pub struct ManagerBookings {
    cx: Context,
    /// Client-side status selection; `None` shows every booking.
    pub status: Option<BookingStatus>,
    listing: Listing<Booking>,
}

impl ManagerBookings {
    pub fn new(cx: Context) -> Result<Self, Error> {
        guard::require(&cx.session, guard::Route::ManagerBookings)?;
        Ok(Self {
            cx,
            status: Some(BookingStatus::Pending),
            listing: Listing::default(),
        })
    }

    pub fn visible(&self) -> Vec<&Booking> {
        self.listing
            .items()
            .iter()
            .filter(|b| self.status.map_or(true, |s| b.status == s))
            .collect()
    }

    pub async fn approve(&mut self, booking: &str) -> Result<Booking, Error> {
        tracing::info!(booking, "approving booking");
        let result = self
            .cx
            .call(bookings::Approve {
                booking: booking.to_owned(),
            })
            .await;
        self.settle(result, "Failed to approve booking").await
    }

    /// Declines a booking, attaching evidence that the amount was refunded.
    pub async fn disapprove(
        &mut self,
        booking: &str,
        reason: String,
        refund_image: Attachment,
    ) -> Result<Booking, Error> {
        required(&reason, "Give a reason for disapproval")?;

        tracing::info!(booking, "disapproving booking");
        let result = self
            .cx
            .call(bookings::Disapprove {
                booking: booking.to_owned(),
                reason,
                refund_image,
            })
            .await;
        self.settle(result, "Failed to disapprove booking").await
    }

    /// Ends a student's stay.
    pub async fn kick(&mut self, booking: &str, reason: String) -> Result<Booking, Error> {
        required(&reason, "Give a reason for removing the student")?;

        tracing::info!(booking, "removing student");
        let result = self
            .cx
            .call(bookings::Kick {
                booking: booking.to_owned(),
                reason,
            })
            .await;
        self.settle(result, "Failed to remove student").await
    }
}

#[async_trait::async_trait]
impl Page for ManagerBookings {
    type Item = Booking;
    const LOAD_FALLBACK: &'static str = "Failed to load bookings";

    fn listing(&self) -> &Listing<Booking> {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing<Booking> {
        &mut self.listing
    }

    async fn fetch(&self) -> anyhow::Result<Vec<Booking>> {
        self.cx.call(bookings::Incoming::default()).await
    }
}
