use hostel_shared::{
    reservation::{
        handle::{ReservationDecision, ReservationDescriptor},
        Reservation, ReservationStatus,
    },
    Id,
};
use reqwest::{Method, RequestBuilder, Response};

pub struct Create(pub ReservationDescriptor);

#[async_trait::async_trait]
impl super::Request for Create {
    type Output = Reservation;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/reservations".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&self.0))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

/// Reservations the calling student made.
pub struct Mine;

#[async_trait::async_trait]
impl super::Request for Mine {
    type Output = Vec<Reservation>;

    fn path(&self) -> String {
        "/reservations/mine".to_owned()
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

/// Reservations made for the calling manager's hostels.
pub struct Incoming;

#[async_trait::async_trait]
impl super::Request for Incoming {
    type Output = Vec<Reservation>;

    fn path(&self) -> String {
        "/reservations/manager".to_owned()
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct Decide {
    pub reservation: Id,
    pub status: ReservationStatus,
}

#[async_trait::async_trait]
impl super::Request for Decide {
    type Output = Reservation;
    const METHOD: Method = Method::PATCH;

    fn path(&self) -> String {
        format!("/reservations/{}", super::Segment(&self.reservation))
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&ReservationDecision {
            status: self.status,
        }))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}
