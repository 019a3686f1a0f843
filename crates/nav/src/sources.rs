//! Route and display-preference signals.
//!
//! Both sources publish over `tokio::sync::watch` channels: subscribers only
//! ever see the latest value, which is all the shell needs to recompute its
//! derived state.

use folio_types::DisplayPreferences;
use tokio::sync::watch;
use tracing::debug;

use crate::resolver::normalize_route;

/// Receiver yielding the current route on every navigation.
pub type RouteWatcher = watch::Receiver<String>;

/// Receiver yielding the display preferences whenever either signal flips.
pub type PreferenceWatcher = watch::Receiver<DisplayPreferences>;

const MAX_HISTORY: usize = 64;

/// In-process router: the current path plus a back-history.
#[derive(Debug)]
pub struct RouteSource {
    sender: watch::Sender<String>,
    history: Vec<String>,
}

impl RouteSource {
    pub fn new(initial: &str) -> Self {
        let (sender, _rx) = watch::channel(normalize_route(initial));
        Self {
            sender,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> String {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> RouteWatcher {
        self.sender.subscribe()
    }

    /// Live subscriptions; drops to zero once every mount released its watcher.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Navigates to `route`. Returns `false` (and notifies nobody) when the
    /// route is already current.
    pub fn navigate(&mut self, route: &str) -> bool {
        let next = normalize_route(route);
        let mut replaced = None;
        self.sender.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            replaced = Some(std::mem::replace(current, next.clone()));
            true
        });
        let Some(previous) = replaced else {
            return false;
        };
        if self.history.len() == MAX_HISTORY {
            self.history.remove(0);
        }
        debug!(from = %previous, to = %next, "navigate");
        self.history.push(previous);
        true
    }

    /// Returns to the previous route, if any.
    pub fn back(&mut self) -> Option<String> {
        let previous = self.history.pop()?;
        debug!(to = %previous, "navigate back");
        self.sender.send_replace(previous.clone());
        Some(previous)
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}

/// Live `reduced_motion` / `is_wide_viewport` signals.
#[derive(Debug)]
pub struct PreferenceSource {
    sender: watch::Sender<DisplayPreferences>,
    breakpoint_columns: u16,
}

impl PreferenceSource {
    pub fn new(initial: DisplayPreferences, breakpoint_columns: u16) -> Self {
        let (sender, _rx) = watch::channel(initial);
        Self {
            sender,
            breakpoint_columns,
        }
    }

    pub fn current(&self) -> DisplayPreferences {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> PreferenceWatcher {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Returns whether subscribers were notified.
    pub fn set_reduced_motion(&self, reduced_motion: bool) -> bool {
        self.sender.send_if_modified(|preferences| {
            let changed = preferences.reduced_motion != reduced_motion;
            preferences.reduced_motion = reduced_motion;
            changed
        })
    }

    /// Feeds a terminal width; only crossing the breakpoint notifies.
    pub fn set_viewport_columns(&self, columns: u16) -> bool {
        let is_wide_viewport = columns >= self.breakpoint_columns;
        self.sender.send_if_modified(|preferences| {
            let changed = preferences.is_wide_viewport != is_wide_viewport;
            preferences.is_wide_viewport = is_wide_viewport;
            changed
        })
    }
}
