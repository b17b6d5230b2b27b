use hostel_shared::{
    chat::{
        handle::{SendMessageDescriptor, StartConversationDescriptor},
        Conversation, Message,
    },
    Id,
};
use reqwest::{Method, RequestBuilder, Response};

pub struct Conversations;

#[async_trait::async_trait]
impl super::Request for Conversations {
    type Output = Vec<Conversation>;

    fn path(&self) -> String {
        "/chat/conversations".to_owned()
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

/// Opens the conversation with another user, creating it on first contact.
pub struct Start {
    pub participant: Id,
}

#[async_trait::async_trait]
impl super::Request for Start {
    type Output = Conversation;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/chat/conversations".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&StartConversationDescriptor {
            participant_id: self.participant.clone(),
        }))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct Messages {
    pub conversation: Id,
}

#[async_trait::async_trait]
impl super::Request for Messages {
    type Output = Vec<Message>;

    fn path(&self) -> String {
        format!("/chat/conversations/{}/messages", super::Segment(&self.conversation))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct SendMessage {
    pub conversation: Id,
    pub text: String,
}

#[async_trait::async_trait]
impl super::Request for SendMessage {
    type Output = Message;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/chat/conversations/{}/messages", super::Segment(&self.conversation))
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&SendMessageDescriptor {
            text: self.text.clone(),
        }))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}
