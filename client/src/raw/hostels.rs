use hostel_shared::{
    hostel::{
        handle::{EditHostelDescriptor, HostelDescriptor, HostelQuery},
        Hostel,
    },
    Id,
};
use reqwest::{Method, RequestBuilder, Response};

use super::Attachment;

/// The public hostel list, filtered server-side.
#[derive(Default)]
pub struct List {
    pub query: HostelQuery,
}

#[async_trait::async_trait]
impl super::Request for List {
    type Output = Vec<Hostel>;
    const AUTH: bool = false;

    fn path(&self) -> String {
        "/hostels".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.query(&self.query))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct Get {
    pub hostel: Id,
}

#[async_trait::async_trait]
impl super::Request for Get {
    type Output = Hostel;
    const AUTH: bool = false;

    fn path(&self) -> String {
        format!("/hostels/{}", super::Segment(&self.hostel))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

/// Hostels owned by the calling manager.
pub struct Mine;

#[async_trait::async_trait]
impl super::Request for Mine {
    type Output = Vec<Hostel>;

    fn path(&self) -> String {
        "/hostels/mine".to_owned()
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct Create {
    pub descriptor: HostelDescriptor,
    pub images: Vec<Attachment>,
}

#[async_trait::async_trait]
impl super::Request for Create {
    type Output = Hostel;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/hostels".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        let files: Vec<_> = self.images.iter().map(|image| ("images", image)).collect();
        Ok(req.multipart(super::multipart_form(&self.descriptor, &files)?))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct Edit {
    pub hostel: Id,
    pub descriptor: EditHostelDescriptor,
}

#[async_trait::async_trait]
impl super::Request for Edit {
    type Output = Hostel;
    const METHOD: Method = Method::PATCH;

    fn path(&self) -> String {
        format!("/hostels/{}", super::Segment(&self.hostel))
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&self.descriptor))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct Delete {
    pub hostel: Id,
}

#[async_trait::async_trait]
impl super::Request for Delete {
    type Output = ();
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        format!("/hostels/{}", super::Segment(&self.hostel))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::ack(response).await
    }
}
