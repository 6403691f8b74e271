//! Manual approval job handler library.
//!
//! A workflow's manual-approval job runs this crate three times over its
//! lifetime: `init` opens the approval request, `callback` records the
//! approver's decision, and `cancel` withdraws the request when the workflow
//! is aborted or times out. The binary entrypoint is in `main.rs`.

pub mod api;
pub mod approval;
pub mod artifacts;
pub mod config;
pub mod console;
pub mod error;
pub mod handlers;

pub use error::{ApprovalError, Result};
pub use handlers::{HandlerKind, ManualApproval};
