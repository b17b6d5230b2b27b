use hostel_shared::{
    booking::{
        handle::{BookingDescriptor, DisapproveDescriptor, KickDescriptor},
        Booking, BookingStatus,
    },
    Id,
};
use reqwest::{Method, RequestBuilder, Response};

use super::Attachment;

/// A student books a room, attaching proof of the transferred amount.
pub struct Create {
    pub descriptor: BookingDescriptor,
    pub transaction_image: Attachment,
}

#[async_trait::async_trait]
impl super::Request for Create {
    type Output = Booking;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/bookings".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.multipart(super::multipart_form(
            &self.descriptor,
            &[("transactionImage", &self.transaction_image)],
        )?))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct Mine;

#[async_trait::async_trait]
impl super::Request for Mine {
    type Output = Vec<Booking>;

    fn path(&self) -> String {
        "/bookings/mine".to_owned()
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

/// Bookings of the calling manager's hostels.
#[derive(Default)]
pub struct Incoming {
    pub status: Option<BookingStatus>,
}

#[async_trait::async_trait]
impl super::Request for Incoming {
    type Output = Vec<Booking>;

    fn path(&self) -> String {
        "/bookings/manager".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(match self.status {
            Some(status) => req.query(&[("status", status)]),
            None => req,
        })
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct Approve {
    pub booking: Id,
}

#[async_trait::async_trait]
impl super::Request for Approve {
    type Output = Booking;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/bookings/{}/approve", super::Segment(&self.booking))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

/// The manager declines a booking and proves the amount was refunded.
pub struct Disapprove {
    pub booking: Id,
    pub reason: String,
    pub refund_image: Attachment,
}

#[async_trait::async_trait]
impl super::Request for Disapprove {
    type Output = Booking;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/bookings/{}/disapprove", super::Segment(&self.booking))
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.multipart(super::multipart_form(
            &DisapproveDescriptor {
                reason: self.reason.clone(),
            },
            &[("refundImage", &self.refund_image)],
        )?))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

/// The student moves out.
pub struct Leave {
    pub booking: Id,
}

#[async_trait::async_trait]
impl super::Request for Leave {
    type Output = Booking;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/bookings/{}/leave", super::Segment(&self.booking))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

/// The manager ends a stay.
pub struct Kick {
    pub booking: Id,
    pub reason: String,
}

#[async_trait::async_trait]
impl super::Request for Kick {
    type Output = Booking;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/bookings/{}/kick", super::Segment(&self.booking))
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&KickDescriptor {
            reason: self.reason.clone(),
        }))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}
