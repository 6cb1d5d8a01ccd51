//! Collects lightweight controller telemetry so sync behaviour can be checked while prototyping.

#[cfg(feature = "telemetry")]
use std::collections::VecDeque;

#[cfg(feature = "telemetry")]
use parking_lot::Mutex;

/// How many recent events a [`Handle`] keeps; older ones are dropped.
pub const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub enum Event {
    SessionStarted,
    FilterChanged(String),
    LoadCompleted { count: usize },
    LoadFailed { error: String },
    MutationApplied(String),
    MutationFailed { action: String, error: String },
    ReorderRolledBack { restored: usize },
}

pub struct Handle {
    #[cfg(feature = "telemetry")]
    events: Mutex<VecDeque<Event>>,
}

impl Default for Handle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("enabled", &cfg!(feature = "telemetry"))
            .finish()
    }
}

impl Handle {
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "telemetry")]
            events: Mutex::new(VecDeque::with_capacity(EVENT_CAPACITY)),
        }
    }

    pub fn record(&self, event: Event) {
        #[cfg(feature = "telemetry")]
        {
            match &event {
                Event::SessionStarted => tracing::debug!("sync telemetry session started"),
                Event::FilterChanged(mode) => {
                    tracing::debug!(mode = mode.as_str(), "sync telemetry filter changed")
                }
                Event::LoadCompleted { count } => {
                    tracing::debug!(count, "sync telemetry load completed")
                }
                Event::LoadFailed { error } => {
                    tracing::debug!(error = %error, "sync telemetry load failed")
                }
                Event::MutationApplied(action) => tracing::debug!(
                    action = action.as_str(),
                    "sync telemetry mutation applied"
                ),
                Event::MutationFailed { action, error } => tracing::debug!(
                    action = action.as_str(),
                    error = %error,
                    "sync telemetry mutation failed"
                ),
                Event::ReorderRolledBack { restored } => {
                    tracing::debug!(restored, "sync telemetry reorder rolled back")
                }
            }
            let mut events = self.events.lock();
            if events.len() == EVENT_CAPACITY {
                events.pop_front();
            }
            events.push_back(event);
        }
        #[cfg(not(feature = "telemetry"))]
        {
            let _ = event;
        }
    }

    pub fn is_enabled(&self) -> bool {
        cfg!(feature = "telemetry")
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> Vec<Event> {
        #[cfg(feature = "telemetry")]
        {
            self.events.lock().iter().cloned().collect()
        }
        #[cfg(not(feature = "telemetry"))]
        {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_events_when_enabled() {
        let handle = Handle::new();
        handle.record(Event::LoadCompleted { count: 2 });
        handle.record(Event::FilterChanged("active".into()));
        if handle.is_enabled() {
            assert_eq!(handle.events().len(), 2);
        } else {
            assert!(handle.events().is_empty());
        }
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn keeps_only_the_most_recent_events() {
        let handle = Handle::new();
        for count in 0..EVENT_CAPACITY + 10 {
            handle.record(Event::LoadCompleted { count });
        }
        let events = handle.events();
        assert_eq!(events.len(), EVENT_CAPACITY);
        assert!(matches!(events[0], Event::LoadCompleted { count: 10 }));
        assert!(matches!(
            events.last(),
            Some(Event::LoadCompleted { count }) if *count == EVENT_CAPACITY + 9
        ));
    }
}
