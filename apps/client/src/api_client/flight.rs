use std::sync::{Mutex, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::errors::RefreshFailure;
use crate::session::Session;

type RefreshFuture = Shared<BoxFuture<'static, Result<Session, RefreshFailure>>>;

/// Single-flight slot for session refreshes.
///
/// The first caller starts the refresh; everyone arriving while it is pending
/// awaits the same future and receives a clone of its outcome.
#[derive(Default)]
pub(crate) struct RefreshFlight {
    in_flight: Mutex<Option<RefreshFuture>>,
}

impl RefreshFlight {
    pub(crate) async fn run<F>(&self, start: F) -> Result<Session, RefreshFailure>
    where
        F: FnOnce() -> BoxFuture<'static, Result<Session, RefreshFailure>>,
    {
        let flight = {
            let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            match slot.as_ref() {
                Some(pending) => pending.clone(),
                None => {
                    let started = start().shared();
                    *slot = Some(started.clone());
                    started
                }
            }
        };

        let outcome = flight.clone().await;

        let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|pending| pending.ptr_eq(&flight)) {
            *slot = None;
        }
        outcome
    }
}
