use hostel_client::{raw::chat, Context};
use hostel_shared::{
    chat::{Conversation, Message},
    Id,
};

use super::{required, Listing, Page};
use crate::{guard, Error};

/// Conversations of the logged in account, and the one currently open.
pub struct ChatView {
    cx: Context,
    listing: Listing<Conversation>,
    open: Option<Id>,
    messages: Listing<Message>,
}

impl ChatView {
    pub fn new(cx: Context) -> Result<Self, Error> {
        guard::require(&cx.session, guard::Route::Chat)?;
        Ok(Self {
            cx,
            listing: Listing::default(),
            open: None,
            messages: Listing::default(),
        })
    }

    pub fn open_conversation(&self) -> Option<&Conversation> {
        let open = self.open.as_deref()?;
        self.listing.items().iter().find(|c| c.id == open)
    }

    pub fn messages(&self) -> &[Message] {
        self.messages.items()
    }

    /// Whether a message was sent by the logged in account.
    pub fn is_mine(&self, message: &Message) -> bool {
        self.cx
            .session
            .current_user()
            .map_or(false, |me| message.sender.id() == me.id)
    }

    /// Opens the conversation with another account,
    /// which the server creates on first contact.
    pub async fn contact(&mut self, participant: &str) -> Result<(), Error> {
        let result = self
            .cx
            .call(chat::Start {
                participant: participant.to_owned(),
            })
            .await;
        let conversation = self.settle(result, "Failed to start conversation").await?;
        self.open(&conversation.id).await
    }

    /// Opens a conversation and fetches its messages.
    pub async fn open(&mut self, conversation: &str) -> Result<(), Error> {
        self.open = Some(conversation.to_owned());
        self.messages = Listing::default();
        self.reload_messages().await
    }

    pub async fn reload_messages(&mut self) -> Result<(), Error> {
        let Some(conversation) = self.open.clone() else {
            return Ok(());
        };

        let result = self.cx.call(chat::Messages { conversation }).await;
        self.messages.apply(result, "Failed to load messages")
    }

    /// Sends a message to the open conversation.
    pub async fn send(&mut self, text: String) -> Result<Message, Error> {
        required(&text, "Message is empty")?;
        let conversation = self
            .open
            .clone()
            .ok_or(Error::InvalidInput("Open a conversation first"))?;

        match self
            .cx
            .call(chat::SendMessage {
                conversation,
                text,
            })
            .await
        {
            Ok(message) => {
                let _ = self.reload_messages().await;
                let _ = self.load().await;
                Ok(message)
            }
            Err(err) => Err(self.messages.fail(err, "Failed to send message")),
        }
    }

    /// The banner of the open conversation.
    pub fn messages_banner(&self) -> Option<&str> {
        self.messages.banner()
    }
}

#[async_trait::async_trait]
impl Page for ChatView {
    type Item = Conversation;
    const LOAD_FALLBACK: &'static str = "Failed to load conversations";

    fn listing(&self) -> &Listing<Conversation> {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing<Conversation> {
        &mut self.listing
    }

    async fn fetch(&self) -> anyhow::Result<Vec<Conversation>> {
        self.cx.call(chat::Conversations).await
    }
}
