//! Visibility-driven load-more trigger.
//!
//! The paginator issues a [`Sentinel`] for the marker drawn after the last
//! displayed item. An [`InfiniteScrollTrigger`] subscribes that sentinel
//! with a [`VisibilityNotifier`] and calls [`Paginator::load_more`] when
//! the notifier reports it visible.
//!
//! The trigger disarms before calling `load_more` and only re-arms for the
//! next sentinel the paginator issues, which happens after the load cycle
//! completes. The paginator's own loading/throttle guards stay the
//! backstop.

use super::clock::Clock;
use super::state::{LoadMoreOutcome, Paginator};
use super::types::Sentinel;
use tracing::trace;

/// Source of "sentinel became visible" signals.
pub trait VisibilityNotifier {
    /// Start watching `sentinel`.
    fn subscribe(&mut self, sentinel: Sentinel);

    /// Stop watching `sentinel`. Unknown sentinels are ignored.
    fn unsubscribe(&mut self, sentinel: Sentinel);

    /// Sentinels reported visible since the previous call.
    fn drain_visible(&mut self) -> Vec<Sentinel>;
}

/// Notifier fed by the render pass.
///
/// After every frame the view calls [`ViewportNotifier::report_rendered`]
/// with the sentinel if its row landed inside the viewport. A watched
/// sentinel fires once when it enters the viewport; it fires again only
/// after leaving and re-entering, or after being re-subscribed.
#[derive(Debug, Default)]
pub struct ViewportNotifier {
    watched: Option<Sentinel>,
    in_view: bool,
    fired: Vec<Sentinel>,
}

impl ViewportNotifier {
    /// Notifier with nothing watched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sentinel currently watched.
    pub fn watched(&self) -> Option<Sentinel> {
        self.watched
    }

    /// Record what the last frame showed.
    pub fn report_rendered(&mut self, visible: Option<Sentinel>) {
        let Some(watched) = self.watched else {
            self.in_view = false;
            return;
        };
        let now_in_view = visible == Some(watched);
        if now_in_view && !self.in_view {
            self.fired.push(watched);
        }
        self.in_view = now_in_view;
    }
}

impl VisibilityNotifier for ViewportNotifier {
    fn subscribe(&mut self, sentinel: Sentinel) {
        self.watched = Some(sentinel);
        self.in_view = false;
    }

    fn unsubscribe(&mut self, sentinel: Sentinel) {
        if self.watched == Some(sentinel) {
            self.watched = None;
            self.in_view = false;
            self.fired.retain(|s| *s != sentinel);
        }
    }

    fn drain_visible(&mut self) -> Vec<Sentinel> {
        std::mem::take(&mut self.fired)
    }
}

/// Notifier driven by an explicit "load more" command.
///
/// For frontends with no notion of a viewport.
#[derive(Debug, Default)]
pub struct CommandNotifier {
    watched: Option<Sentinel>,
    fired: Vec<Sentinel>,
}

impl CommandNotifier {
    /// Notifier with nothing watched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the watched sentinel. Returns `false` when nothing is watched.
    pub fn request(&mut self) -> bool {
        match self.watched {
            Some(sentinel) => {
                if !self.fired.contains(&sentinel) {
                    self.fired.push(sentinel);
                }
                true
            }
            None => false,
        }
    }
}

impl VisibilityNotifier for CommandNotifier {
    fn subscribe(&mut self, sentinel: Sentinel) {
        self.watched = Some(sentinel);
    }

    fn unsubscribe(&mut self, sentinel: Sentinel) {
        if self.watched == Some(sentinel) {
            self.watched = None;
            self.fired.retain(|s| *s != sentinel);
        }
    }

    fn drain_visible(&mut self) -> Vec<Sentinel> {
        std::mem::take(&mut self.fired)
    }
}

/// Binds a notifier to a paginator's load-more.
///
/// Owns the notifier so that dropping the trigger releases the watch.
#[derive(Debug)]
pub struct InfiniteScrollTrigger<N: VisibilityNotifier> {
    notifier: N,
    armed: Option<Sentinel>,
}

impl<N: VisibilityNotifier> InfiniteScrollTrigger<N> {
    /// Trigger with nothing armed yet; call [`Self::sync`] after every
    /// paginator change.
    pub fn new(notifier: N) -> Self {
        Self {
            notifier,
            armed: None,
        }
    }

    /// Sentinel currently subscribed.
    pub fn armed(&self) -> Option<Sentinel> {
        self.armed
    }

    /// Shared access to the notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Mutable access to the notifier (to feed it render results).
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Align the subscription with the paginator's current sentinel.
    ///
    /// Unsubscribes when the sentinel disappeared (paged mode, loading,
    /// exhausted) or went stale (reset, completed cycle), and subscribes
    /// the new one if any.
    pub fn sync<C: Clock>(&mut self, paginator: &Paginator<C>) {
        let wanted = paginator.sentinel();
        if wanted == self.armed {
            return;
        }
        if let Some(old) = self.armed.take() {
            trace!(?old, "releasing sentinel watch");
            self.notifier.unsubscribe(old);
        }
        if let Some(new) = wanted {
            trace!(?new, "watching sentinel");
            self.notifier.subscribe(new);
        }
        self.armed = wanted;
    }

    /// Drain visibility events and run at most one load-more.
    ///
    /// Events for sentinels other than the armed one are ignored. Returns
    /// the load-more outcome when one was attempted.
    pub fn dispatch<C: Clock>(&mut self, paginator: &mut Paginator<C>) -> Option<LoadMoreOutcome> {
        let events = self.notifier.drain_visible();
        let armed = self.armed?;
        if !events.contains(&armed) {
            return None;
        }

        self.notifier.unsubscribe(armed);
        self.armed = None;
        let outcome = paginator.load_more();
        self.sync(paginator);
        Some(outcome)
    }

    /// Release the watch, e.g. when the owning view goes away.
    pub fn detach(&mut self) {
        if let Some(sentinel) = self.armed.take() {
            self.notifier.unsubscribe(sentinel);
        }
    }
}

impl<N: VisibilityNotifier> Drop for InfiniteScrollTrigger<N> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
