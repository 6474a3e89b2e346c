//! Profiler thread-name channel.
//!
//! A profiler sink is installed once per process with [`install`]. When none
//! is installed and the crate was built with one of the `profile-with-*`
//! features, names go to that backend through the `profiling` crate
//! ([`ProfilingBackend`]). Otherwise, or when the crate is built without the
//! `profiling` feature, the channel is absent and [`set_current`] does nothing
//! but report [`NameError::ProfilerUnavailable`].
//!
//! The profiler always receives the full name; no length limit applies here.

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

#[cfg(feature = "profiling")]
use std::sync::OnceLock;

use crate::error::NameError;

/// A profiler that can label threads.
///
/// Implementations are called on the thread being named, possibly while that
/// thread's locals are being torn down. A panic is caught and reported as
/// [`NameError::ProfilerPanicked`].
pub trait ThreadProfiler: Send + Sync + 'static {
    fn set_thread_name(&self, name: &str);
}

#[cfg(feature = "profiling")]
static PROFILER: OnceLock<Box<dyn ThreadProfiler>> = OnceLock::new();

#[cfg(feature = "profiling-backend")]
const BACKEND: Option<&'static dyn ThreadProfiler> = Some(&ProfilingBackend);

#[cfg(not(feature = "profiling-backend"))]
const BACKEND: Option<&'static dyn ThreadProfiler> = None;

thread_local! {
    /// Last name this thread sent through the profiler channel
    static CURRENT_NAME: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Install the process-wide profiler sink. Only the first call succeeds.
///
/// An installed sink takes precedence over a compiled-in backend.
#[cfg(feature = "profiling")]
pub fn install<P: ThreadProfiler>(profiler: P) -> Result<(), NameError> {
    PROFILER
        .set(Box::new(profiler))
        .map_err(|_| NameError::ProfilerAlreadyInstalled)?;
    tracing::debug!("thread profiler installed");
    Ok(())
}

/// Install the process-wide profiler sink. Only the first call succeeds.
#[cfg(not(feature = "profiling"))]
pub fn install<P: ThreadProfiler>(_profiler: P) -> Result<(), NameError> {
    Err(NameError::ProfilingDisabled)
}

fn active() -> Option<&'static dyn ThreadProfiler> {
    #[cfg(feature = "profiling")]
    {
        PROFILER
            .get()
            .map(|profiler| profiler.as_ref())
            .or(BACKEND)
    }
    #[cfg(not(feature = "profiling"))]
    {
        BACKEND
    }
}

/// Whether a profiler sink is installed or a backend is compiled in.
pub fn is_available() -> bool {
    active().is_some()
}

/// Send the full `name` of the calling thread to the active profiler.
pub fn set_current(name: &str) -> Result<(), NameError> {
    let profiler = active().ok_or(NameError::ProfilerUnavailable)?;
    panic::catch_unwind(AssertUnwindSafe(|| profiler.set_thread_name(name)))
        .map_err(|_| NameError::ProfilerPanicked)?;
    // Gone once the thread's locals are destroyed; the sink already has the name.
    let _ = CURRENT_NAME.try_with(|current| {
        *current.borrow_mut() = Some(name.to_owned());
    });
    Ok(())
}

/// The profiler-visible name of the calling thread, if one was set.
pub fn current() -> Option<String> {
    CURRENT_NAME
        .try_with(|current| current.borrow().clone())
        .ok()
        .flatten()
}

/// Names threads through the `profiling` crate.
///
/// Which profiler sees the name (tracy, puffin, optick, superluminal or
/// `tracing`) is chosen by the matching `profile-with-*` feature. Without one
/// the call compiles to nothing.
#[cfg(feature = "profiling")]
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfilingBackend;

#[cfg(feature = "profiling")]
impl ThreadProfiler for ProfilingBackend {
    #[allow(unused_variables)]
    fn set_thread_name(&self, name: &str) {
        profiling::register_thread!(name);
    }
}

/// Reports thread names as `tracing` events.
///
/// Each call emits one `INFO` event with target `thread_name` and the fields
/// `thread.name` and `thread.id`, so that trace exporters layered on the
/// subscriber can label the thread's track.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProfiler;

impl ThreadProfiler for TracingProfiler {
    fn set_thread_name(&self, name: &str) {
        tracing::info!(
            target: "thread_name",
            { thread.name = name, thread.id = ?thread::current().id() },
            "thread named"
        );
    }
}
