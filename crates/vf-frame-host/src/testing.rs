//! Scripted host double for widget tests.
//!
//! Plays the role the real JS SDK binding plays in the browser: hand back a
//! context, answer the install prompt, accept transactions, and emit
//! lifecycle events. Everything is recorded so tests can assert on exact
//! call counts.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use anyhow::Result;
use async_trait::async_trait;
use vf_frame_types::{
    AddFrameOutcome, HostEventKind, ProviderInfo, SessionContext, TransactionRequest, TxReceipt,
};

use crate::events::{EventBus, EventHandler, Subscription};
use crate::{FrameHost, HostError, ProviderDiscovery, ProviderHandler};

#[derive(Default)]
pub struct RecordingHost {
    context: RefCell<Option<SessionContext>>,
    context_error: RefCell<Option<String>>,
    add_frame_outcome: RefCell<AddFrameOutcome>,
    /// Scripted results consumed front-to-back; when empty, submissions
    /// succeed with a synthetic hash.
    submit_script: RefCell<VecDeque<Result<TxReceipt, HostError>>>,
    submitted: RefCell<Vec<TransactionRequest>>,
    providers: RefCell<Vec<ProviderInfo>>,

    context_calls: Cell<u32>,
    ready_calls: Cell<u32>,
    add_frame_calls: Cell<u32>,

    gate: RefCell<Option<Rc<SubmitGate>>>,
    bus: EventBus,
}

/// Holds every submission in flight until released, so tests can observe
/// the pending window between a submission and its receipt.
#[derive(Default)]
pub struct SubmitGate {
    open: Cell<bool>,
    wakers: RefCell<Vec<Waker>>,
}

impl SubmitGate {
    pub fn release(&self) {
        self.open.set(true);
        for waker in self.wakers.borrow_mut().drain(..) {
            waker.wake();
        }
    }
}

struct GateWait {
    gate: Rc<SubmitGate>,
}

impl Future for GateWait {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.gate.open.get() {
            Poll::Ready(())
        } else {
            self.gate.wakers.borrow_mut().push(cx.waker().clone());
            Poll::Pending
        }
    }
}

impl RecordingHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_context(context: SessionContext) -> Rc<Self> {
        let host = Self::default();
        *host.context.borrow_mut() = Some(context);
        Rc::new(host)
    }

    /// Make `context()` return an error instead of a context.
    pub fn fail_context(&self, message: &str) {
        *self.context_error.borrow_mut() = Some(message.to_owned());
    }

    pub fn script_add_frame(&self, outcome: AddFrameOutcome) {
        *self.add_frame_outcome.borrow_mut() = outcome;
    }

    pub fn script_submit(&self, result: Result<TxReceipt, HostError>) {
        self.submit_script.borrow_mut().push_back(result);
    }

    pub fn announce_provider(&self, provider: ProviderInfo) {
        self.providers.borrow_mut().push(provider);
    }

    /// Park every subsequent submission until the returned gate is
    /// released.
    pub fn hold_submissions(&self) -> Rc<SubmitGate> {
        let gate = Rc::new(SubmitGate::default());
        *self.gate.borrow_mut() = Some(gate.clone());
        gate
    }

    /// Emit a lifecycle event as the host would.
    pub fn emit(&self, event: &vf_frame_types::HostEvent) {
        self.bus.emit(event);
    }

    pub fn active_subscriptions(&self) -> usize {
        self.bus.active_subscriptions()
    }

    pub fn context_calls(&self) -> u32 {
        self.context_calls.get()
    }

    pub fn ready_calls(&self) -> u32 {
        self.ready_calls.get()
    }

    pub fn add_frame_calls(&self) -> u32 {
        self.add_frame_calls.get()
    }

    pub fn submissions(&self) -> Vec<TransactionRequest> {
        self.submitted.borrow().clone()
    }
}

#[async_trait(?Send)]
impl FrameHost for RecordingHost {
    async fn context(&self) -> Result<Option<SessionContext>> {
        self.context_calls.set(self.context_calls.get() + 1);
        if let Some(message) = self.context_error.borrow().clone() {
            anyhow::bail!(message);
        }
        Ok(self.context.borrow().clone())
    }

    async fn ready(&self) {
        self.ready_calls.set(self.ready_calls.get() + 1);
    }

    async fn add_frame(&self) -> AddFrameOutcome {
        self.add_frame_calls.set(self.add_frame_calls.get() + 1);
        self.add_frame_outcome.borrow().clone()
    }

    async fn submit_transaction(&self, req: TransactionRequest) -> Result<TxReceipt, HostError> {
        self.submitted.borrow_mut().push(req);
        let gate = self.gate.borrow().clone();
        if let Some(gate) = gate {
            GateWait { gate }.await;
        }
        match self.submit_script.borrow_mut().pop_front() {
            Some(result) => result,
            None => Ok(TxReceipt {
                tx_hash: format!("0xstub{:04x}", self.submitted.borrow().len()),
            }),
        }
    }

    fn subscribe(&self, kind: HostEventKind, handler: EventHandler) -> Subscription {
        self.bus.subscribe(kind, handler)
    }
}

impl ProviderDiscovery for RecordingHost {
    /// Announces every scripted provider immediately, then stays silent.
    fn watch(&self, handler: ProviderHandler) -> Subscription {
        for provider in self.providers.borrow().iter() {
            handler(provider);
        }
        Subscription::new(|| {})
    }
}
