//! Failure kinds of the individual naming channels.
//!
//! These never reach callers of [`set_thread_name`](crate::set_thread_name);
//! they are logged and dropped there. The channel shims and
//! [`ThreadNamer::try_set_thread_name`](crate::ThreadNamer::try_set_thread_name)
//! return them for callers that want the detail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NameError {
    #[error("thread name contains an interior NUL byte")]
    InteriorNul,
    #[error("thread naming is not supported on this platform")]
    Unsupported,
    #[error("OS thread naming failed: {0}")]
    Os(#[source] std::io::Error),
    #[error("no profiler is installed")]
    ProfilerUnavailable,
    #[error("profiler sink panicked")]
    ProfilerPanicked,
    #[error("a profiler is already installed")]
    ProfilerAlreadyInstalled,
    #[error("built without the `profiling` feature")]
    ProfilingDisabled,
}
