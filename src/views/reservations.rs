use hostel_client::{raw::reservations, Context};
use hostel_shared::reservation::{handle::ReservationDescriptor, Reservation, ReservationStatus};

use super::{required, Listing, Page};
use crate::{guard, Error};

pub struct StudentReservations {
    cx: Context,
    listing: Listing<Reservation>,
}

impl StudentReservations {
    pub fn new(cx: Context) -> Result<Self, Error> {
        guard::require(&cx.session, guard::Route::StudentReservations)?;
        Ok(Self {
            cx,
            listing: Listing::default(),
        })
    }

    /// Asks a hostel to hold a place.
    pub async fn reserve(&mut self, hostel: &str, message: String) -> Result<Reservation, Error> {
        required(hostel, "Select a hostel")?;

        let result = self
            .cx
            .call(reservations::Create(ReservationDescriptor {
                hostel_id: hostel.to_owned(),
                message,
            }))
            .await;
        self.settle(result, "Failed to send reservation").await
    }
}

#[async_trait::async_trait]
impl Page for StudentReservations {
    type Item = Reservation;
    const LOAD_FALLBACK: &'static str = "Failed to load reservations";

    fn listing(&self) -> &Listing<Reservation> {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing<Reservation> {
        &mut self.listing
    }

    async fn fetch(&self) -> anyhow::Result<Vec<Reservation>> {
        self.cx.call(reservations::Mine).await
    }
}

pub struct ManagerReservations {
    cx: Context,
    pub status: Option<ReservationStatus>,
    listing: Listing<Reservation>,
}

impl ManagerReservations {
    pub fn new(cx: Context) -> Result<Self, Error> {
        guard::require(&cx.session, guard::Route::ManagerReservations)?;
        Ok(Self {
            cx,
            status: None,
            listing: Listing::default(),
        })
    }

    pub fn visible(&self) -> Vec<&Reservation> {
        self.listing
            .items()
            .iter()
            .filter(|r| self.status.map_or(true, |s| r.status == s))
            .collect()
    }

    pub async fn accept(&mut self, reservation: &str) -> Result<Reservation, Error> {
        self.decide(reservation, ReservationStatus::Accepted).await
    }

    pub async fn reject(&mut self, reservation: &str) -> Result<Reservation, Error> {
        self.decide(reservation, ReservationStatus::Rejected).await
    }

    async fn decide(
        &mut self,
        reservation: &str,
        status: ReservationStatus,
    ) -> Result<Reservation, Error> {
        tracing::info!(reservation, ?status, "deciding reservation");
        let result = self
            .cx
            .call(reservations::Decide {
                reservation: reservation.to_owned(),
                status,
            })
            .await;
        self.settle(result, "Failed to update reservation").await
    }
}

#[async_trait::async_trait]
impl Page for ManagerReservations {
    type Item = Reservation;
    const LOAD_FALLBACK: &'static str = "Failed to load reservations";

    fn listing(&self) -> &Listing<Reservation> {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing<Reservation> {
        &mut self.listing
    }

    async fn fetch(&self) -> anyhow::Result<Vec<Reservation>> {
        self.cx.call(reservations::Incoming).await
    }
}
