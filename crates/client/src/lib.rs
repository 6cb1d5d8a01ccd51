//! Client-side view synchronization: keeps a cached task list, its filtered view and
//! keyboard focus consistent with the authoritative store.

pub mod focus;
pub mod sync;
pub mod telemetry;

pub use focus::{FocusTarget, FocusTracker};
pub use sync::{
    apply_ready, Completion, Dispatcher, NoticeKind, ReorderRejected, StatusNotice, SyncEvent,
    ViewSync,
};
