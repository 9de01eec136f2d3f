//! Global rendering lock around the UI runtime
//!
//! The UI runtime is not reentrant: every call into it (construction, tick,
//! input, drawing) must happen while the render lock is held. [`RenderLock`]
//! owns the runtime outright, so the only way to reach it is through a
//! [`RenderGuard`], and the lock is released when the guard drops, on every
//! exit path.
//!
//! # Example
//!
//! ```ignore
//! static RENDER_LOCK: StaticCell<RenderLock<PanelUi<PanelActions>>> = StaticCell::new();
//! let lock = RENDER_LOCK.init(RenderLock::new(ui));
//!
//! {
//!     let mut ui = lock.lock().await;
//!     ui.tick();
//! } // released here
//! ```

use core::future::Future;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicU32, Ordering};

use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use log::trace;

use crate::error::PanelError;

/// Wait policy when acquiring the render lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockTimeout {
    /// Block until the lock is free
    Forever,
    /// Try once without waiting
    Immediate,
    /// Give up after this many milliseconds
    Millis(u32),
}

impl LockTimeout {
    /// Negative values mean "wait forever", zero means "don't wait".
    pub const fn from_millis(ms: i32) -> Self {
        if ms < 0 {
            LockTimeout::Forever
        } else if ms == 0 {
            LockTimeout::Immediate
        } else {
            LockTimeout::Millis(ms as u32)
        }
    }
}

/// Mutual exclusion around the UI runtime `T`.
pub struct RenderLock<T> {
    inner: Mutex<CriticalSectionRawMutex, T>,
    acquisitions: AtomicU32,
    releases: AtomicU32,
}

impl<T> RenderLock<T> {
    pub const fn new(ui: T) -> Self {
        Self {
            inner: Mutex::new(ui),
            acquisitions: AtomicU32::new(0),
            releases: AtomicU32::new(0),
        }
    }

    /// Acquire the lock, waiting as long as it takes.
    pub async fn lock(&self) -> RenderGuard<'_, T> {
        let guard = self.inner.lock().await;
        self.acquired(guard)
    }

    /// Acquire the lock only if it is free right now.
    pub fn try_lock(&self) -> Result<RenderGuard<'_, T>, PanelError> {
        self.inner
            .try_lock()
            .map(|guard| self.acquired(guard))
            .map_err(|_| PanelError::LockBusy)
    }

    /// Acquire the lock unless `deadline` completes first.
    ///
    /// The lock is polled before the deadline, so an already-elapsed deadline
    /// still succeeds on a free lock.
    pub async fn lock_until<F: Future>(&self, deadline: F) -> Result<RenderGuard<'_, T>, PanelError> {
        match select(self.inner.lock(), deadline).await {
            Either::First(guard) => Ok(self.acquired(guard)),
            Either::Second(_) => Err(PanelError::LockTimeout),
        }
    }

    /// Total number of successful acquisitions.
    pub fn acquisitions(&self) -> u32 {
        self.acquisitions.load(Ordering::Relaxed)
    }

    /// Total number of guards dropped.
    pub fn releases(&self) -> u32 {
        self.releases.load(Ordering::Relaxed)
    }

    pub fn is_held(&self) -> bool {
        self.acquisitions() != self.releases()
    }

    fn acquired<'a>(&'a self, guard: MutexGuard<'a, CriticalSectionRawMutex, T>) -> RenderGuard<'a, T> {
        let n = self.acquisitions.fetch_add(1, Ordering::Relaxed) + 1;
        trace!("Render lock acquired ({})", n);
        RenderGuard {
            guard,
            releases: &self.releases,
        }
    }
}

/// Scoped access to the UI runtime; releases the render lock on drop.
pub struct RenderGuard<'a, T> {
    guard: MutexGuard<'a, CriticalSectionRawMutex, T>,
    releases: &'a AtomicU32,
}

impl<T> Deref for RenderGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for RenderGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<T> Drop for RenderGuard<'_, T> {
    fn drop(&mut self) {
        let n = self.releases.fetch_add(1, Ordering::Relaxed) + 1;
        trace!("Render lock released ({})", n);
    }
}
