//! In-memory doubles for the transport, navigator and page surfaces.

use crate::error::RemoteError;
use crate::navigator::Navigator;
use crate::transport::{Request, Spawner, Transport};
use futures_util::future::{self, LocalBoxFuture};
use futures_util::task::noop_waker_ref;
use futures_util::FutureExt;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::task::{Context, Poll};

/// Runs each task to completion on the spot; the fakes never pend.
pub fn immediate_spawner() -> Spawner {
    Rc::new(|task: LocalBoxFuture<'static, ()>| {
        assert!(task.now_or_never().is_some(), "test task did not complete");
    })
}

/// Queues tasks and polls them only when told to, so pending work stays
/// pending between steps.
#[derive(Clone, Default)]
pub struct ManualSpawner {
    tasks: Rc<RefCell<Vec<LocalBoxFuture<'static, ()>>>>,
}

impl ManualSpawner {
    pub fn spawner(&self) -> Spawner {
        let tasks = self.tasks.clone();
        Rc::new(move |task: LocalBoxFuture<'static, ()>| tasks.borrow_mut().push(task))
    }

    /// Poll every queued task once, including ones spawned along the way.
    /// Returns how many are still pending.
    pub fn run_once(&self) -> usize {
        let mut cx = Context::from_waker(noop_waker_ref());
        let mut pending = Vec::new();
        loop {
            let batch = std::mem::take(&mut *self.tasks.borrow_mut());
            if batch.is_empty() {
                break;
            }
            for mut task in batch {
                if task.poll_unpin(&mut cx).is_pending() {
                    pending.push(task);
                }
            }
        }
        let remaining = pending.len();
        self.tasks.borrow_mut().extend(pending);
        remaining
    }
}

type HeldSlot = Rc<RefCell<Option<Result<String, RemoteError>>>>;

#[derive(Clone, Default)]
pub struct FakeTransport {
    requests: Rc<RefCell<Vec<Request>>>,
    responses: Rc<RefCell<Vec<Result<String, u16>>>>,
    fail_all: Rc<Cell<bool>>,
    held_path: Rc<RefCell<Option<String>>>,
    held: Rc<RefCell<Vec<HeldSlot>>>,
}

impl FakeTransport {
    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub fn fail_all(&self) {
        self.fail_all.set(true);
    }

    /// Requests to `path` stay pending until [`FakeTransport::complete`]
    /// resolves them, in whatever order the test picks.
    pub fn hold(&self, path: &str) {
        *self.held_path.borrow_mut() = Some(path.to_string());
    }

    /// Resolve the `index`-th held request.
    pub fn complete(&self, index: usize, outcome: Result<&str, u16>) {
        let slot = self.held.borrow()[index].clone();
        *slot.borrow_mut() = Some(outcome.map(str::to_string).map_err(RemoteError::Status));
    }

    /// Queue the outcome of the next request; `Err` carries a status code.
    pub fn respond(&self, outcome: Result<&str, u16>) {
        self.responses
            .borrow_mut()
            .push(outcome.map(str::to_string));
    }
}

impl Transport for FakeTransport {
    fn execute(&self, request: Request) -> LocalBoxFuture<'static, Result<String, RemoteError>> {
        let held = self.held_path.borrow().as_deref() == Some(request.path.as_str());
        self.requests.borrow_mut().push(request);
        if held {
            let slot = HeldSlot::default();
            self.held.borrow_mut().push(slot.clone());
            return future::poll_fn(move |_| match slot.borrow_mut().take() {
                Some(outcome) => Poll::Ready(outcome),
                None => Poll::Pending,
            })
            .boxed_local();
        }
        let outcome = if self.fail_all.get() {
            Err(RemoteError::Transport("connection refused".to_string()))
        } else if self.responses.borrow().is_empty() {
            Ok(String::new())
        } else {
            self.responses
                .borrow_mut()
                .remove(0)
                .map_err(RemoteError::Status)
        };
        future::ready(outcome).boxed_local()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    Replace(String),
    Assign(String),
    Reload,
}

#[derive(Clone, Default)]
pub struct FakeNavigator {
    events: Rc<RefCell<Vec<NavEvent>>>,
}

impl FakeNavigator {
    pub fn events(&self) -> Vec<NavEvent> {
        self.events.borrow().clone()
    }
}

impl Navigator for FakeNavigator {
    fn replace(&self, path: &str) {
        self.events
            .borrow_mut()
            .push(NavEvent::Replace(path.to_string()));
    }

    fn assign(&self, path: &str) {
        self.events
            .borrow_mut()
            .push(NavEvent::Assign(path.to_string()));
    }

    fn reload(&self) {
        self.events.borrow_mut().push(NavEvent::Reload);
    }
}
