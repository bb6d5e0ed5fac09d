//! Workflow entity field-sets.
//!
//! Each type here is one queryable collection of the workflow runtime. The
//! field names are the transport-level names accepted in filters and sorts
//! (`Process::TENANT_ID == "TenantId"`), and records serialize with the same
//! names.
//!
//! | Entity | Key | Parent |
//! |--------|-----|--------|
//! | [`Process`] | `Id` | |
//! | [`Transition`] | `Id` | `ProcessId` |
//! | [`InboxEntry`] | `ProcessId`, `IdentityId` | `ProcessId` |
//! | [`Scheme`] | `Code` | |
//! | [`Runtime`] | `Id` | |
//! | [`ProcessStatus`] | `Id` | |
//! | [`Approval`] | `Id` | `ProcessId` |
//! | [`ProcessParameter`] | `ProcessId`, `Name` | `ProcessId` |
//! | [`ProcessTimer`] | `Id` | `ProcessId` |

mod approval;
mod inbox;
mod parameter;
mod process;
mod runtime;
mod scheme;
mod status;
mod timer;
mod transition;

pub use approval::Approval;
pub use inbox::InboxEntry;
pub use parameter::ProcessParameter;
pub use process::Process;
pub use runtime::{Runtime, RuntimeStatus};
pub use scheme::Scheme;
pub use status::{ProcessStatus, ProcessStatusKind};
pub use timer::ProcessTimer;
pub use transition::{Transition, TransitionClassifier};
