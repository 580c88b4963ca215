//! POSIX shared memory objects
//!
//! Thin ownership wrapper around `shm_open` + `mmap`. The creating side owns
//! the object and unlinks it on drop; openers only unmap.

use crate::error::{Error, Result};
use rustix::fd::OwnedFd;
use rustix::fs::{fstat, ftruncate};
use rustix::mm::{mmap, munmap, MapFlags, ProtFlags};
use rustix::shm::{shm_open, shm_unlink, Mode, ShmOFlags};
use std::ffi::CString;
use std::ptr::NonNull;

const SHM_PREFIX: &str = "/oslab_";
const MAX_NAME_LEN: usize = 255 - SHM_PREFIX.len();

/// A mapped shared memory region
pub struct ShmRegion {
    #[allow(dead_code)]
    fd: OwnedFd,
    base: NonNull<u8>,
    len: usize,
    name: String,
    is_owner: bool,
}

// SAFETY: the mapping itself is plain bytes; all cross-process access goes
// through atomics layered on top by the ticker module.
unsafe impl Send for ShmRegion {}
unsafe impl Sync for ShmRegion {}

fn object_name(name: &str) -> Result<CString> {
    if name.len() > MAX_NAME_LEN {
        return Err(Error::NameTooLong {
            max: MAX_NAME_LEN,
            got: name.len(),
        });
    }
    CString::new(format!("{SHM_PREFIX}{name}")).map_err(|e| Error::ShmCreate {
        name: name.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
    })
}

fn map_shared(fd: &OwnedFd, len: usize) -> Result<NonNull<u8>> {
    let addr = unsafe {
        mmap(
            std::ptr::null_mut(),
            len,
            ProtFlags::READ | ProtFlags::WRITE,
            MapFlags::SHARED,
            fd,
            0,
        )
        .map_err(|e| Error::Mmap(e.into()))?
    };
    NonNull::new(addr.cast::<u8>()).ok_or_else(|| {
        Error::Mmap(std::io::Error::new(
            std::io::ErrorKind::Other,
            "mmap returned null",
        ))
    })
}

impl ShmRegion {
    /// Create a region of `len` bytes, zero-filled.
    ///
    /// If an object with the same name is left over from a previous run, it
    /// is reused rather than failing the demo.
    pub fn create(name: &str, len: usize) -> Result<Self> {
        let c_name = object_name(name)?;

        let fd = match shm_open(
            c_name.as_c_str(),
            ShmOFlags::CREATE | ShmOFlags::EXCL | ShmOFlags::RDWR,
            Mode::RUSR | Mode::WUSR | Mode::RGRP | Mode::WGRP,
        ) {
            Ok(fd) => fd,
            Err(_) => shm_open(c_name.as_c_str(), ShmOFlags::RDWR, Mode::empty()).map_err(
                |e| Error::ShmCreate {
                    name: name.to_string(),
                    source: e.into(),
                },
            )?,
        };

        ftruncate(&fd, len as u64).map_err(|e| Error::Truncate(e.into()))?;
        let base = map_shared(&fd, len)?;

        unsafe {
            std::ptr::write_bytes(base.as_ptr(), 0, len);
        }

        Ok(Self {
            fd,
            base,
            len,
            name: name.to_string(),
            is_owner: true,
        })
    }

    /// Open an existing region, taking its size from the object.
    pub fn open(name: &str) -> Result<Self> {
        let c_name = object_name(name)?;
        let wrap = |e: rustix::io::Errno| Error::ShmOpen {
            name: name.to_string(),
            source: e.into(),
        };

        let fd = shm_open(c_name.as_c_str(), ShmOFlags::RDWR, Mode::empty()).map_err(wrap)?;
        let len = fstat(&fd).map_err(wrap)?.st_size as usize;
        let base = map_shared(&fd, len)?;

        Ok(Self {
            fd,
            base,
            len,
            name: name.to_string(),
            is_owner: false,
        })
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *mut u8 {
        self.base.as_ptr()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for the handle that created (and will unlink) the object.
    #[inline(always)]
    pub fn is_owner(&self) -> bool {
        self.is_owner
    }
}

impl Drop for ShmRegion {
    fn drop(&mut self) {
        unsafe {
            let _ = munmap(self.base.as_ptr().cast(), self.len);
        }

        if self.is_owner {
            if let Ok(c_name) = object_name(&self.name) {
                let _ = shm_unlink(c_name.as_c_str());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_open_sees_same_bytes() {
        let name = "shm_region_basic";
        let region = ShmRegion::create(name, 4096).unwrap();
        assert!(region.is_owner());
        assert_eq!(region.len(), 4096);

        unsafe {
            std::ptr::write(region.as_ptr(), 0xA5u8);
        }

        let other = ShmRegion::open(name).unwrap();
        assert!(!other.is_owner());
        assert_eq!(other.len(), 4096);
        let byte = unsafe { std::ptr::read(other.as_ptr()) };
        assert_eq!(byte, 0xA5);

        drop(other);
        drop(region);
    }

    #[test]
    fn create_zero_fills() {
        let region = ShmRegion::create("shm_region_zeroed", 128).unwrap();
        let bytes = unsafe { std::slice::from_raw_parts(region.as_ptr(), region.len()) };
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let name = "x".repeat(300);
        match ShmRegion::create(&name, 64).err() {
            Some(Error::NameTooLong { got, .. }) => assert_eq!(got, 300),
            other => panic!("expected NameTooLong, got {other:?}"),
        }
    }

    #[test]
    fn open_missing_region_fails() {
        assert!(matches!(
            ShmRegion::open("shm_region_never_created"),
            Err(Error::ShmOpen { .. })
        ));
    }
}
