use std::cell::Cell;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use futures::{FutureExt, Stream, StreamExt};

use crate::domain::logging::LogComponent;
use crate::{log_debug, log_info};

/// Future driving a refresh loop; the host spawns it on its executor.
pub type RefreshLoop = LocalBoxFuture<'static, ()>;

/// Handle to a periodic refresh. Cancelling or dropping the handle stops the
/// loop; no tick callback runs after that.
pub struct RefreshTask {
    abort: AbortHandle,
    cancelled: Rc<Cell<bool>>,
}

impl RefreshTask {
    /// Wire `on_tick` to every item of `ticks`.
    pub fn from_stream<S, F>(ticks: S, mut on_tick: F) -> (Self, RefreshLoop)
    where
        S: Stream<Item = ()> + 'static,
        F: FnMut() + 'static,
    {
        let (abort, registration) = AbortHandle::new_pair();
        let cancelled = Rc::new(Cell::new(false));
        let flag = Rc::clone(&cancelled);

        let ticking = async move {
            let mut ticks = Box::pin(ticks);
            while ticks.next().await.is_some() {
                // a tick may already be buffered when cancel() lands
                if flag.get() {
                    break;
                }
                on_tick();
            }
        };

        let refresh_loop = Abortable::new(ticking, registration)
            .map(|_| {
                log_debug!(LogComponent::Application("Refresh"), "Refresh loop finished");
            })
            .boxed_local();

        (Self { abort, cancelled }, refresh_loop)
    }

    /// Run `on_tick` every `interval_ms` on the browser event loop.
    pub fn spawn<F>(interval_ms: u32, on_tick: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let ticks = gloo_timers::future::IntervalStream::new(interval_ms);
        let (task, refresh_loop) = Self::from_stream(ticks, on_tick);
        wasm_bindgen_futures::spawn_local(refresh_loop);
        log_info!(LogComponent::Application("Refresh"), "Auto refresh started every {} ms", interval_ms);
        task
    }

    pub fn cancel(&self) {
        if !self.cancelled.replace(true) {
            self.abort.abort();
            log_info!(LogComponent::Application("Refresh"), "Auto refresh cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
