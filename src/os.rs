//! OS thread-name channel.
//!
//! Names are cut down to [`OS_NAME_MAX_LEN`] bytes before they reach the
//! platform, so an over-long name never gets rejected by the kernel.

use crate::error::NameError;

/// Longest name the OS channel passes on, excluding the NUL terminator.
pub const OS_NAME_MAX_LEN: usize = 15;

/// Longest prefix of `name` that fits in [`OS_NAME_MAX_LEN`] bytes without
/// splitting a character.
pub fn truncate(name: &str) -> &str {
    if name.len() <= OS_NAME_MAX_LEN {
        return name;
    }
    let mut end = OS_NAME_MAX_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// Set the OS-visible name of the calling thread.
pub fn set_current(name: &str) -> Result<(), NameError> {
    let truncated = truncate(name);
    let cname = std::ffi::CString::new(truncated).map_err(|_| NameError::InteriorNul)?;
    tracing::trace!("os::set_current {:?}", truncated);
    setname(&cname)
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn setname(cname: &std::ffi::CStr) -> Result<(), NameError> {
    // pthread_setname_np reports failure through its return value, not errno.
    // SAFETY: `cname` is NUL-terminated, at most 16 bytes with the terminator,
    // and outlives the call; `pthread_self()` is always a live thread.
    let rc = unsafe { libc::pthread_setname_np(libc::pthread_self(), cname.as_ptr()) };
    check(rc)
}

#[cfg(target_vendor = "apple")]
fn setname(cname: &std::ffi::CStr) -> Result<(), NameError> {
    // Apple only allows naming the current thread.
    // SAFETY: `cname` is NUL-terminated and outlives the call.
    let rc = unsafe { libc::pthread_setname_np(cname.as_ptr()) };
    check(rc)
}

#[cfg(not(any(target_os = "linux", target_os = "android", target_vendor = "apple")))]
fn setname(_cname: &std::ffi::CStr) -> Result<(), NameError> {
    Err(NameError::Unsupported)
}

#[cfg(any(target_os = "linux", target_os = "android", target_vendor = "apple"))]
fn check(rc: libc::c_int) -> Result<(), NameError> {
    if rc == 0 {
        Ok(())
    } else {
        Err(NameError::Os(std::io::Error::from_raw_os_error(rc)))
    }
}

/// The OS-visible name of the calling thread, if the platform can report it.
#[cfg(any(target_os = "linux", target_os = "android"))]
pub fn current() -> Option<String> {
    let comm = std::fs::read_to_string("/proc/thread-self/comm").ok()?;
    Some(comm.trim_end_matches('\n').to_owned())
}

/// The OS-visible name of the calling thread, if the platform can report it.
#[cfg(target_vendor = "apple")]
pub fn current() -> Option<String> {
    let mut buf = [0 as libc::c_char; 64];
    // SAFETY: `buf.len()` is the real capacity of `buf`; the call writes at
    // most that many bytes, NUL included.
    let rc = unsafe { libc::pthread_getname_np(libc::pthread_self(), buf.as_mut_ptr(), buf.len()) };
    if rc != 0 {
        return None;
    }
    // SAFETY: on success `buf` holds a NUL-terminated string.
    let name = unsafe { std::ffi::CStr::from_ptr(buf.as_ptr()) };
    Some(name.to_string_lossy().into_owned())
}

/// The OS-visible name of the calling thread, if the platform can report it.
#[cfg(not(any(target_os = "linux", target_os = "android", target_vendor = "apple")))]
pub fn current() -> Option<String> {
    None
}
