//! Crate level module for `thread_namer`.
//!
//! Gives the calling thread a human-readable name so that debuggers, OS
//! thread listings and profilers can tell threads apart. A name goes out on
//! two independent channels:
//!
//! 1. **OS**: the platform thread name (`pthread_setname_np`). Only the first
//!    [`os::OS_NAME_MAX_LEN`] bytes are kept.
//! 2. **Profiler**: the sink registered with [`profiler::install`], or the
//!    `profiling` crate backend chosen by a `profile-with-*` feature. It
//!    receives the full name. Compiled in by the `profiling` feature.
//!
//! Naming is a diagnostic aid, so [`set_thread_name`] never fails and never
//! panics. Use [`ThreadNamer::try_set_thread_name`] to see what each channel
//! did.
//!
//! ## Example
//!
//! ```no_run
//! use thread_namer::{profiler, set_thread_name};
//!
//! profiler::install(profiler::TracingProfiler).ok();
//!
//! std::thread::spawn(|| {
//!     // The OS sees "worker-thread-0", the profiler "worker-thread-007".
//!     set_thread_name("worker-thread-007");
//! });
//! ```

/// Channel failure kinds.
pub mod error;
/// Channel composition and configuration.
pub mod namer;
/// OS thread-name channel.
pub mod os;
/// Profiler thread-name channel.
pub mod profiler;

#[cfg(test)]
mod test_util;

pub use error::NameError;
pub use namer::{ChannelOutcome, NamingReport, ThreadNamer, ThreadNamerBuilder};

/// Name the calling thread on both channels.
///
/// The OS channel gets `name` truncated to 15 bytes, the profiler channel (if
/// present) gets it whole. Failures on either channel are absorbed.
pub fn set_thread_name(name: &str) {
    ThreadNamer::new().set_thread_name(name);
}
