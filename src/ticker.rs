//! Shared-memory counter protocol
//!
//! One publisher stores an incrementing counter into a shared region; any
//! number of watchers poll it and report transitions. The only data
//! invariant is "last write wins" — watchers that sleep through a few ticks
//! simply see the latest value.

use crate::error::{Error, Result};
use crate::shm::ShmRegion;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

const TICKER_MAGIC: u32 = 0x4F544B52; // "OTKR"
const TICKER_VERSION: u32 = 1;

/// Counter values published by [`TickPublisher::run`]: `0..TICK_COUNT`.
pub const TICK_COUNT: u32 = 0x100;

/// How often a watcher re-reads the cell while waiting for a change.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Header at the base of the shared region
#[repr(C)]
struct TickerHeader {
    magic: u32,
    version: u32,
    counter: AtomicU32,
}

impl TickerHeader {
    const SIZE: usize = std::mem::size_of::<TickerHeader>();
}

fn header_of(region: &ShmRegion) -> Result<*mut TickerHeader> {
    if region.len() < TickerHeader::SIZE {
        return Err(Error::RegionTooSmall {
            need: TickerHeader::SIZE,
            got: region.len(),
        });
    }
    Ok(region.as_ptr() as *mut TickerHeader)
}

/// Writer side: owns the region and publishes counter values.
pub struct TickPublisher {
    region: ShmRegion,
    header: *mut TickerHeader,
}

// SAFETY: all shared state behind `header` is accessed through atomics.
unsafe impl Send for TickPublisher {}

impl TickPublisher {
    /// Create the shared region and stamp the protocol header.
    pub fn create(name: &str) -> Result<Self> {
        let region = ShmRegion::create(name, TickerHeader::SIZE)?;
        let header = header_of(&region)?;

        unsafe {
            (*header).magic = TICKER_MAGIC;
            (*header).version = TICKER_VERSION;
            (*header).counter = AtomicU32::new(0);
        }

        Ok(Self { region, header })
    }

    /// Store a counter value for watchers to pick up.
    #[inline]
    pub fn publish(&self, value: u32) {
        unsafe { &(*self.header).counter }.store(value, Ordering::Release);
    }

    /// Publish `0..count` with a delay between ticks, reporting each value.
    pub fn run<F>(&self, interval: Duration, count: u32, mut observer: F)
    where
        F: FnMut(u32),
    {
        for value in 0..count {
            self.publish(value);
            observer(value);
            if value + 1 < count {
                std::thread::sleep(interval);
            }
        }
    }

    pub fn name(&self) -> &str {
        self.region.name()
    }
}

/// Reader side: opens an existing region and polls the counter.
pub struct TickWatcher {
    region: ShmRegion,
    header: *const TickerHeader,
}

// SAFETY: read-only access through atomics.
unsafe impl Send for TickWatcher {}
unsafe impl Sync for TickWatcher {}

impl TickWatcher {
    /// Attach to a publisher's region, validating the header.
    pub fn open(name: &str) -> Result<Self> {
        let region = ShmRegion::open(name)?;
        let header = header_of(&region)? as *const TickerHeader;

        let (magic, version) = unsafe { ((*header).magic, (*header).version) };
        if magic != TICKER_MAGIC {
            return Err(Error::InvalidMagic {
                expected: TICKER_MAGIC,
                got: magic,
            });
        }
        if version != TICKER_VERSION {
            return Err(Error::VersionMismatch {
                expected: TICKER_VERSION,
                got: version,
            });
        }

        Ok(Self { region, header })
    }

    /// Latest published value.
    #[inline]
    pub fn current(&self) -> u32 {
        unsafe { &(*self.header).counter }.load(Ordering::Acquire)
    }

    /// Poll until the value moves away from `last`.
    ///
    /// Returns the new value, or [`Error::WatchTimeout`] if the deadline
    /// passes with no change.
    pub fn wait_for_change(&self, last: u32, timeout: Duration) -> Result<u32> {
        let deadline = Instant::now() + timeout;
        loop {
            let value = self.current();
            if value != last {
                return Ok(value);
            }
            if Instant::now() >= deadline {
                return Err(Error::WatchTimeout);
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    /// Report every observed transition until `final_value` is seen.
    ///
    /// `step_timeout` bounds the wait for each individual change, not the
    /// whole run.
    pub fn run<F>(&self, final_value: u32, step_timeout: Duration, mut observer: F) -> Result<()>
    where
        F: FnMut(u32),
    {
        let mut last = self.current();
        observer(last);
        while last != final_value {
            last = self.wait_for_change(last, step_timeout)?;
            observer(last);
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        self.region.name()
    }
}
