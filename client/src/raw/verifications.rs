use hostel_shared::{
    verification::{
        handle::{ReviewDescriptor, VerificationDescriptor},
        ManagerVerification, VerificationStatus,
    },
    Id,
};
use reqwest::{Method, RequestBuilder, Response};

use super::Attachment;

/// A manager submits their credentials together with photos of the building.
pub struct Submit {
    pub descriptor: VerificationDescriptor,
    pub building_images: Vec<Attachment>,
}

#[async_trait::async_trait]
impl super::Request for Submit {
    type Output = ManagerVerification;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/verifications".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        let files: Vec<_> = self
            .building_images
            .iter()
            .map(|image| ("buildingImages", image))
            .collect();

        Ok(req.multipart(super::multipart_form(&self.descriptor, &files)?))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

/// The calling manager's own verification, if they submitted one.
pub struct Mine;

#[async_trait::async_trait]
impl super::Request for Mine {
    type Output = Option<ManagerVerification>;

    fn path(&self) -> String {
        "/verifications/me".to_owned()
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::optional_data(response).await
    }
}

#[derive(Default)]
pub struct List {
    pub status: Option<VerificationStatus>,
}

#[async_trait::async_trait]
impl super::Request for List {
    type Output = Vec<ManagerVerification>;

    fn path(&self) -> String {
        "/verifications".to_owned()
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
    pub verification: Id,
    pub status: VerificationStatus,
    pub remarks: Option<String>,
}

#[async_trait::async_trait]
impl super::Request for Review {
    type Output = ManagerVerification;
    const METHOD: Method = Method::PATCH;

    fn path(&self) -> String {
        format!("/verifications/{}/review", super::Segment(&self.verification))
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
