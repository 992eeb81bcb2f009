//! Provider implementations: manual, host callback and Linux `/proc`.

pub mod callback;
pub mod manual;
#[cfg(feature = "tokio-runtime")]
pub mod procfs;

pub use callback::UsageFn;
pub use manual::{ManualLoad, ManualMemory, ManualUsage};
#[cfg(feature = "tokio-runtime")]
pub use procfs::{ProcLoadAvg, ProcMemInfo};
