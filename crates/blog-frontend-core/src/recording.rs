//! Recording host for driving the async behaviors without a browser.
//!
//! Every dialog, console write, and reload is appended to a call log;
//! requests are captured and answered from a queue of canned responses.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::host::{DevConsole, Dialogs, Navigation};
use crate::http::{HttpRequest, HttpResponse, Transport};

/// One observable host interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Confirm(String),
    Alert(String),
    Log(String),
    Error(String),
    Reload,
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    confirm_answer: Cell<bool>,
    responses: RefCell<VecDeque<std::result::Result<HttpResponse, String>>>,
    calls: RefCell<Vec<Call>>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl RecordingHost {
    /// A host whose confirmations all answer `answer`.
    #[must_use]
    pub fn confirming(answer: bool) -> Self {
        let host = Self::default();
        host.confirm_answer.set(answer);
        host
    }

    /// Queue an empty-bodied response.
    #[must_use]
    pub fn respond(self, status: u16) -> Self {
        self.respond_body(status, "")
    }

    #[must_use]
    pub fn respond_body(self, status: u16, body: &str) -> Self {
        self.push_response(status, body);
        self
    }

    #[must_use]
    pub fn fail_transport(self, message: &str) -> Self {
        self.responses.borrow_mut().push_back(Err(message.to_string()));
        self
    }

    /// Queue a response after construction.
    pub fn push_response(&self, status: u16, body: &str) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn set_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    #[must_use]
    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Dialogs for RecordingHost {
    async fn confirm(&self, message: &str) -> bool {
        self.record(Call::Confirm(message.to_string()));
        self.confirm_answer.get()
    }

    fn alert(&self, message: &str) {
        self.record(Call::Alert(message.to_string()));
    }
}

impl DevConsole for RecordingHost {
    fn log(&self, message: &str) {
        self.record(Call::Log(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.record(Call::Error(message.to_string()));
    }
}

impl Navigation for RecordingHost {
    fn reload(&self) {
        self.record(Call::Reload);
    }
}

impl Transport for RecordingHost {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.sent.borrow_mut().push(request);
        let next = self.responses.borrow_mut().pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(Error::Transport(message)),
            None => Err(Error::Transport("no response queued".to_string())),
        }
    }
}
