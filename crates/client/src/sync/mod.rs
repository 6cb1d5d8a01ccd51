mod controller;
pub mod dispatch;
pub mod intent;
pub mod message;
#[cfg(test)]
mod session;
pub mod state;
mod update;


pub use controller::ViewSync;
pub use dispatch::{apply_ready, perform, Dispatcher};
pub use intent::{Dispatch, MutationKind, Request, Ticket};
pub use message::{Completion, Reply};
#[cfg(test)]
pub(crate) use session::SyncSession;
pub use state::{LoadState, NoticeKind, ReorderRejected, StatusNotice, SyncEvent};
