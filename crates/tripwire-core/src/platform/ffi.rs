//! # OS Debug API FFI Declarations
//!
//! `extern` declarations for the handful of OS functions `libc` does not
//! cover. They are wrapped in safe functions in [`super::host`] and
//! [`super::probe`].
//!
//! ## References
//!
//! - [IsDebuggerPresent](https://learn.microsoft.com/en-us/windows/win32/api/debugapi/nf-debugapi-isdebuggerpresent)
//! - [OutputDebugStringA](https://learn.microsoft.com/en-us/windows/win32/api/debugapi/nf-debugapi-outputdebugstringa)
//! - [Android NDK logging](https://developer.android.com/ndk/reference/group/logging)

#![allow(non_snake_case)]

#[cfg(windows)]
pub use windows::*;

#[cfg(target_os = "android")]
pub use android::*;

#[cfg(windows)]
mod windows
{
    use core::ffi::c_char;

    #[link(name = "kernel32")]
    extern "system" {
        /// Nonzero if the calling process runs under a user-mode debugger.
        pub fn IsDebuggerPresent() -> i32;

        /// Send a NUL-terminated string to the attached debugger's output window.
        pub fn OutputDebugStringA(output: *const c_char);
    }
}

#[cfg(target_os = "android")]
mod android
{
    use core::ffi::{c_char, c_int};

    /// `ANDROID_LOG_INFO` from `<android/log.h>`
    pub const ANDROID_LOG_INFO: c_int = 4;

    #[link(name = "log")]
    extern "C" {
        /// Write a tagged message to the Android log buffer.
        pub fn __android_log_write(prio: c_int, tag: *const c_char, text: *const c_char) -> c_int;
    }
}
