use routine_model::{CatalogItem, ChatMessage, ChatRequest};

use crate::conversation::Conversation;
use crate::prompt::{follow_up_request, routine_request};
use crate::{ChatTransport, ConfigurationError, Error};

type OnMessageFn = Box<dyn Fn(&ChatMessage) + Send + Sync>;

/// [`Advisor`] builder.
pub struct AdvisorBuilder<T> {
    transport: Result<T, ConfigurationError>,
    on_message: Option<OnMessageFn>,
}

impl<T: ChatTransport> AdvisorBuilder<T> {
    /// Creates a builder that sends requests through `transport`.
    #[inline]
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport: Ok(transport),
            on_message: None,
        }
    }

    /// Creates a builder without a usable transport.
    ///
    /// Every request made by the resulting advisor reports `err` in the
    /// transcript instead of touching the network.
    #[inline]
    pub fn unconfigured(err: ConfigurationError) -> Self {
        Self {
            transport: Err(err),
            on_message: None,
        }
    }

    /// Attaches a callback to be invoked when a message is added to the
    /// transcript.
    #[inline]
    pub fn on_message(
        mut self,
        on_message: impl Fn(&ChatMessage) + Send + Sync + 'static,
    ) -> Self {
        self.on_message = Some(Box::new(on_message));
        self
    }

    /// Builds the advisor.
    #[inline]
    pub fn build(self) -> Advisor<T> {
        Advisor {
            transport: self.transport,
            conversation: Conversation::default(),
            on_message: self.on_message,
        }
    }
}

/// Generates routines and answers follow-up questions about them.
///
/// Both operations report their outcome as transcript messages, so a
/// front end only needs to render what arrives through
/// [`AdvisorBuilder::on_message`]. Failures are rendered as assistant
/// messages too and are additionally returned for callers that want to
/// react to them.
pub struct Advisor<T> {
    transport: Result<T, ConfigurationError>,
    conversation: Conversation,
    on_message: Option<OnMessageFn>,
}

impl<T: ChatTransport> Advisor<T> {
    /// Returns the conversation so far.
    #[inline]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Asks for a routine using the products in `selection`.
    ///
    /// An empty selection is answered locally without sending anything.
    /// Otherwise the conversation starts over with the new routine.
    pub async fn generate_routine(
        &mut self,
        selection: &[CatalogItem],
    ) -> Result<String, Error> {
        if selection.is_empty() {
            let err = Error::EmptySelection;
            self.add_message(ChatMessage::assistant(err.to_string()));
            return Err(err);
        }

        self.conversation.reset();
        let req = routine_request(selection);
        info!("requesting a routine for {} product(s)", selection.len());

        match self.send(&req).await {
            Ok(reply) => {
                self.add_message(ChatMessage::assistant(reply.clone()));
                Ok(reply)
            }
            Err(err) => {
                self.add_message(ChatMessage::assistant(format!(
                    "Error generating routine: {err}. Please make sure your \
                     relay is set up correctly."
                )));
                Err(err)
            }
        }
    }

    /// Asks a follow-up question, replaying the conversation so far.
    ///
    /// Blank input is ignored and returns [`Error::EmptyMessage`]
    /// without touching the transcript.
    pub async fn ask(&mut self, message: &str) -> Result<String, Error> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::EmptyMessage);
        }

        let req = follow_up_request(&self.conversation, message);
        self.add_message(ChatMessage::user(message));

        match self.send(&req).await {
            Ok(reply) => {
                self.add_message(ChatMessage::assistant(reply.clone()));
                Ok(reply)
            }
            Err(err) => {
                self.add_message(ChatMessage::assistant(format!(
                    "Error: {err}. Please make sure your relay is set up \
                     correctly."
                )));
                Err(err)
            }
        }
    }

    async fn send(&self, req: &ChatRequest) -> Result<String, Error> {
        let transport = match &self.transport {
            Ok(transport) => transport,
            Err(err) => return Err(err.clone().into()),
        };
        trace!("sending request: {req:?}");
        transport.send(req).await.inspect_err(|err| {
            error!("chat request failed: {err}");
        })
    }

    fn add_message(&mut self, message: ChatMessage) {
        if let Some(on_message) = &self.on_message {
            on_message(&message);
        }
        self.conversation.push(message);
    }
}
