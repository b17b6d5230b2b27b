use hostel_shared::{
    fee::{handle::FeeDescriptor, Fee, FeeStatus, FeeSummary},
    verification::handle::ReviewDescriptor,
    Id,
};
use reqwest::{Method, RequestBuilder, Response};

use super::Attachment;

/// What each of the calling manager's hostels owes and hasn't paid yet.
pub struct PendingSummary;

#[async_trait::async_trait]
impl super::Request for PendingSummary {
    type Output = Vec<FeeSummary>;

    fn path(&self) -> String {
        "/fees/pending-summary".to_owned()
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct Submit {
    pub descriptor: FeeDescriptor,
    pub proof_image: Attachment,
}

#[async_trait::async_trait]
impl super::Request for Submit {
    type Output = Fee;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/fees".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.multipart(super::multipart_form(
            &self.descriptor,
            &[("proofImage", &self.proof_image)],
        )?))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct Mine;

#[async_trait::async_trait]
impl super::Request for Mine {
    type Output = Vec<Fee>;

    fn path(&self) -> String {
        "/fees/mine".to_owned()
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

#[derive(Default)]
pub struct List {
    pub status: Option<FeeStatus>,
}

#[async_trait::async_trait]
impl super::Request for List {
    type Output = Vec<Fee>;

    fn path(&self) -> String {
        "/fees".to_owned()
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

pub struct Review {
    pub fee: Id,
    pub status: FeeStatus,
    pub remarks: Option<String>,
}

#[async_trait::async_trait]
impl super::Request for Review {
    type Output = Fee;
    const METHOD: Method = Method::PATCH;

    fn path(&self) -> String {
        format!("/fees/{}/review", super::Segment(&self.fee))
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&ReviewDescriptor {
            status: self.status,
            remarks: self.remarks.clone(),
        }))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}
