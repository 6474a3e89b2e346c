use crate::{error::NameError, os, profiler};

/// Applies a thread name through the OS channel and the profiler channel.
///
/// The channels run independently: a failure in one never prevents the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadNamer {
    os: bool,
    profiler: bool,
}

impl Default for ThreadNamer {
    fn default() -> Self {
        ThreadNamer {
            os: true,
            profiler: true,
        }
    }
}

impl ThreadNamer {
    pub fn new() -> Self {
        ThreadNamer::default()
    }

    pub fn builder() -> ThreadNamerBuilder {
        ThreadNamerBuilder::default()
    }

    /// Name the calling thread. Never fails; channel errors are logged at
    /// `debug` and dropped.
    pub fn set_thread_name(&self, name: &str) {
        let report = self.try_set_thread_name(name);
        if let ChannelOutcome::Failed(err) = &report.os {
            tracing::debug!("OS thread name {:?} not applied: {}", name, err);
        }
        if let ChannelOutcome::Failed(err) = &report.profiler {
            tracing::debug!("profiler thread name {:?} not applied: {}", name, err);
        }
    }

    /// Like [`set_thread_name`](Self::set_thread_name), but reports what each
    /// channel did.
    pub fn try_set_thread_name(&self, name: &str) -> NamingReport {
        let os = if self.os {
            ChannelOutcome::from(os::set_current(name))
        } else {
            ChannelOutcome::Skipped
        };

        let profiler = if self.profiler {
            match profiler::set_current(name) {
                // An absent profiler is the normal case, not a failure.
                Err(NameError::ProfilerUnavailable) => ChannelOutcome::Skipped,
                result => ChannelOutcome::from(result),
            }
        } else {
            ChannelOutcome::Skipped
        };

        tracing::trace!(
            "ThreadNamer::try_set_thread_name {:?} os: {:?} profiler: {:?}",
            name,
            os,
            profiler
        );
        NamingReport { os, profiler }
    }
}

pub struct ThreadNamerBuilder {
    os: bool,
    profiler: bool,
}

impl Default for ThreadNamerBuilder {
    fn default() -> Self {
        let namer = ThreadNamer::default();
        ThreadNamerBuilder {
            os: namer.os,
            profiler: namer.profiler,
        }
    }
}

impl ThreadNamerBuilder {
    pub fn new() -> Self {
        ThreadNamerBuilder::default()
    }

    pub fn os(mut self, enable: bool) -> Self {
        self.os = enable;
        self
    }

    pub fn profiler(mut self, enable: bool) -> Self {
        self.profiler = enable;
        self
    }

    pub fn build(self) -> ThreadNamer {
        ThreadNamer {
            os: self.os,
            profiler: self.profiler,
        }
    }
}

/// What a single channel did with a name.
#[derive(Debug)]
pub enum ChannelOutcome {
    Applied,
    /// Channel disabled on the namer, or no profiler present.
    Skipped,
    Failed(NameError),
}

impl ChannelOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ChannelOutcome::Applied)
    }

    pub fn failed(&self) -> Option<&NameError> {
        match self {
            ChannelOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<Result<(), NameError>> for ChannelOutcome {
    fn from(result: Result<(), NameError>) -> Self {
        match result {
            Ok(()) => ChannelOutcome::Applied,
            Err(err) => ChannelOutcome::Failed(err),
        }
    }
}

/// Per-channel result of [`ThreadNamer::try_set_thread_name`].
#[derive(Debug)]
pub struct NamingReport {
    pub os: ChannelOutcome,
    pub profiler: ChannelOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::capture_events;
    use std::thread;
    use tracing::Level;

    #[test]
    fn default_enables_both_channels() {
        assert_eq!(ThreadNamer::new(), ThreadNamer::builder().build());
        assert_eq!(
            ThreadNamer::builder().os(false).profiler(false).build(),
            ThreadNamer {
                os: false,
                profiler: false
            }
        );
    }

    #[test]
    fn disabled_channels_are_skipped() {
        thread::spawn(|| {
            let before = os::current();
            let report = ThreadNamer::builder()
                .os(false)
                .profiler(false)
                .build()
                .try_set_thread_name("untouched");
            assert!(matches!(report.os, ChannelOutcome::Skipped));
            assert!(matches!(report.profiler, ChannelOutcome::Skipped));
            assert_eq!(os::current(), before);
        })
        .join()
        .unwrap();
    }

    #[cfg(not(feature = "profiling-backend"))]
    #[test]
    fn missing_profiler_is_skipped_not_failed() {
        thread::spawn(|| {
            let report = ThreadNamer::new().try_set_thread_name("no-profiler");
            assert!(matches!(report.profiler, ChannelOutcome::Skipped));
        })
        .join()
        .unwrap();
    }

    #[test]
    fn os_failure_is_reported_and_swallowed() {
        thread::spawn(|| {
            let namer = ThreadNamer::new();
            let report = namer.try_set_thread_name("nul\0inside");
            assert!(matches!(report.os, ChannelOutcome::Failed(NameError::InteriorNul)));

            // Same input through the infallible entry point.
            namer.set_thread_name("nul\0inside");
        })
        .join()
        .unwrap();
    }

    #[cfg(any(target_os = "linux", target_os = "android", target_vendor = "apple"))]
    #[test]
    fn os_channel_applies_truncated_name() {
        thread::spawn(|| {
            let report = ThreadNamer::new().try_set_thread_name("worker-thread-007");
            assert!(report.os.is_applied());
            assert_eq!(os::current().as_deref(), Some("worker-thread-0"));
        })
        .join()
        .unwrap();
    }

    #[test]
    fn failures_surface_only_as_one_debug_event() {
        thread::spawn(|| {
            let events = capture_events(|| crate::set_thread_name("bad\0name"));
            let logged: Vec<_> = events
                .iter()
                .filter(|event| event.level <= Level::DEBUG)
                .collect();

            assert_eq!(logged.len(), 1, "{:?}", events);
            assert_eq!(logged[0].level, Level::DEBUG);
            let message = logged[0].field("message").unwrap_or_default();
            assert!(message.starts_with("OS thread name"), "{}", message);
            assert!(message.contains(&NameError::InteriorNul.to_string()), "{}", message);
        })
        .join()
        .unwrap();
    }
}
