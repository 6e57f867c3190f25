//! Memory-mapped register backends.
//!
//! [`MmioRegion`] performs the volatile accesses over an existing mapping.
//! On Linux, [`DevMemRegion`] creates that mapping from `/dev/gpiomem` (no
//! root needed, offset 0 is the GPIO block) or `/dev/mem` (physical
//! address), and unmaps it on drop.

use core::ptr::NonNull;

use crate::app::ports::{RegisterRegion, check_offset};

/// Volatile 32-bit accessors over mapped device memory.
#[derive(Debug)]
pub struct MmioRegion {
    base: NonNull<u32>,
    len: usize,
}

// SAFETY: the mapping is device memory, not Rust-owned data; every access is
// a single volatile word operation and the port contract leaves
// read-modify-write serialisation to callers.
unsafe impl Send for MmioRegion {}
unsafe impl Sync for MmioRegion {}

impl MmioRegion {
    /// # Safety
    ///
    /// `base` must be 4-byte aligned and point to `len` bytes of mapped
    /// device memory that stay mapped for the lifetime of the returned value.
    pub const unsafe fn new(base: NonNull<u32>, len: usize) -> Self {
        Self { base, len }
    }

    pub fn as_ptr(&self) -> *mut u32 {
        self.base.as_ptr()
    }
}

impl RegisterRegion for MmioRegion {
    fn len(&self) -> usize {
        self.len
    }

    fn read32(&self, offset: usize) -> u32 {
        check_offset(offset, self.len);
        // SAFETY: offset checked against the mapped length in `check_offset`;
        // mapping validity is the constructor's contract.
        unsafe { self.base.as_ptr().add(offset / 4).read_volatile() }
    }

    fn write32(&self, offset: usize, value: u32) {
        check_offset(offset, self.len);
        // SAFETY: as in `read32`.
        unsafe { self.base.as_ptr().add(offset / 4).write_volatile(value) }
    }
}

// ── Linux /dev/gpiomem, /dev/mem ──────────────────────────────

#[cfg(target_os = "linux")]
pub use linux::DevMemRegion;

#[cfg(target_os = "linux")]
mod linux {
    use core::ptr::{self, NonNull};
    use std::fs::OpenOptions;
    use std::os::unix::fs::OpenOptionsExt;
    use std::os::unix::io::AsRawFd;

    use log::{info, warn};

    use super::MmioRegion;
    use crate::app::ports::RegisterRegion;
    use crate::error::{Error, Result};

    /// A register block mapped from a memory device file.
    #[derive(Debug)]
    pub struct DevMemRegion {
        mmio: MmioRegion,
    }

    impl DevMemRegion {
        /// Map `len` bytes at byte offset `base` of `device`.
        ///
        /// `base` must be page aligned (`0` for `/dev/gpiomem`,
        /// [`GPIO_BASE`](crate::pins::GPIO_BASE) for `/dev/mem`).
        pub fn open(device: &str, base: u64, len: usize) -> Result<Self> {
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .custom_flags(libc::O_SYNC)
                .open(device)
                .map_err(|e| {
                    warn!("mmio: cannot open {}: {}", device, e);
                    Error::RegionUnavailable(e.raw_os_error().unwrap_or(0))
                })?;

            let offset = libc::off_t::try_from(base).map_err(|_| Error::RegionUnavailable(libc::EINVAL))?;

            // SAFETY: fresh shared mapping of a device file we hold open; the
            // kernel validates length and offset. The fd may close afterwards,
            // the mapping stays until munmap.
            let addr = unsafe {
                libc::mmap(
                    ptr::null_mut(),
                    len,
                    libc::PROT_READ | libc::PROT_WRITE,
                    libc::MAP_SHARED,
                    file.as_raw_fd(),
                    offset,
                )
            };
            if addr == libc::MAP_FAILED {
                let e = std::io::Error::last_os_error();
                warn!("mmio: mmap of {} at {:#x} failed: {}", device, base, e);
                return Err(Error::RegionUnavailable(e.raw_os_error().unwrap_or(0)));
            }

            let base_ptr = NonNull::new(addr.cast::<u32>()).ok_or(Error::RegionUnavailable(0))?;
            info!("mmio: mapped {:#x} bytes of {} at {:#x}", len, device, base);

            // SAFETY: mmap returned a page-aligned mapping of `len` bytes that
            // lives until `Drop` unmaps it.
            Ok(Self { mmio: unsafe { MmioRegion::new(base_ptr, len) } })
        }
    }

    impl RegisterRegion for DevMemRegion {
        fn len(&self) -> usize {
            self.mmio.len()
        }

        fn read32(&self, offset: usize) -> u32 {
            self.mmio.read32(offset)
        }

        fn write32(&self, offset: usize, value: u32) {
            self.mmio.write32(offset, value);
        }
    }

    impl Drop for DevMemRegion {
        fn drop(&mut self) {
            // SAFETY: pointer and length come from the successful mmap in
            // `open`; nothing can access the mapping after drop.
            let rc = unsafe { libc::munmap(self.mmio.as_ptr().cast(), self.mmio.len()) };
            if rc != 0 {
                warn!("mmio: munmap failed: {}", std::io::Error::last_os_error());
            }
        }
    }
}
