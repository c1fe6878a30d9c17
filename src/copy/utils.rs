//! Low-level helpers for producing destination files.
//!
//! Byte streaming with the best available kernel path, and an explicit
//! close that reports errors the implicit close on drop would swallow.

use std::fs::File;
use std::io;

// =============================================================================
// File content copying
// =============================================================================

/// Copy all remaining bytes of `src` into `dst`.
///
/// On Linux, uses `copy_file_range` so data never enters userspace, falling
/// back to `std::io::copy` when the filesystems cannot do it (cross-device,
/// unsupported). Elsewhere uses `std::io::copy` directly.
pub(crate) fn copy_file_contents(src: &File, dst: &File, len: u64) -> io::Result<u64> {
    #[cfg(target_os = "linux")]
    {
        copy_file_range_all(src, dst, len)
    }
    #[cfg(not(target_os = "linux"))]
    {
        use std::io::BufReader;
        let _ = len;
        io::copy(&mut BufReader::new(src), &mut &*dst)
    }
}

#[cfg(target_os = "linux")]
fn copy_file_range_all(src: &File, dst: &File, len: u64) -> io::Result<u64> {
    use std::io::BufReader;
    use std::os::unix::io::AsRawFd;

    let src_fd = src.as_raw_fd();
    let dst_fd = dst.as_raw_fd();
    let mut copied: u64 = 0;

    loop {
        // The length is only a hint: the source may grow or shrink while we
        // copy, and EOF is what ends the loop
        let chunk_size = len.saturating_sub(copied).clamp(64 * 1024, 128 * 1024 * 1024) as usize;

        // SAFETY: both descriptors are open for the lifetime of the borrows;
        // null offsets mean "use and advance the file position"
        let result = unsafe {
            libc::copy_file_range(
                src_fd,
                std::ptr::null_mut(),
                dst_fd,
                std::ptr::null_mut(),
                chunk_size,
                0,
            )
        };

        if result < 0 {
            let err = io::Error::last_os_error();
            if copied == 0
                && matches!(
                    err.raw_os_error(),
                    Some(libc::EXDEV | libc::ENOSYS | libc::EINVAL | libc::EOPNOTSUPP | libc::EPERM)
                )
            {
                return io::copy(&mut BufReader::new(src), &mut &*dst);
            }
            return Err(err);
        }

        if result == 0 {
            return Ok(copied);
        }

        copied += result as u64;
    }
}

// =============================================================================
// Handle release
// =============================================================================

/// Close `file`, returning the error from `close(2)`.
///
/// Dropping a `File` closes it but discards any error. Network and some
/// local filesystems report deferred write failures only at close.
#[cfg(unix)]
pub(crate) fn close_file(file: File) -> io::Result<()> {
    use std::os::unix::io::IntoRawFd;

    let fd = file.into_raw_fd();
    // SAFETY: `into_raw_fd` transferred ownership of a valid descriptor to
    // us, and it is closed exactly once here
    if unsafe { libc::close(fd) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Close `file`. Non-Unix platforms report no close errors.
#[cfg(not(unix))]
pub(crate) fn close_file(file: File) -> io::Result<()> {
    drop(file);
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
