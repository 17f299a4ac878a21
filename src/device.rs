//! Fullscreen and screen wake-lock handling
//!
//! Both are conveniences: every failure is logged and dropped, the
//! session never sees an error from here.

use log::{debug, warn};

use crate::error::DeviceError;

/// Display capabilities provided by the host
pub trait DisplayDevice {
    /// Handle keeping the screen awake until released
    type WakeLock;

    fn request_fullscreen(&mut self) -> Result<(), DeviceError>;

    fn exit_fullscreen(&mut self) -> Result<(), DeviceError>;

    fn acquire_wake_lock(&mut self) -> Result<Self::WakeLock, DeviceError>;

    fn release_wake_lock(&mut self, lock: Self::WakeLock);
}

/// Device without fullscreen or wake-lock support
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDisplayDevice;

impl DisplayDevice for NoDisplayDevice {
    type WakeLock = ();

    fn request_fullscreen(&mut self) -> Result<(), DeviceError> {
        Err(DeviceError::Unsupported)
    }

    fn exit_fullscreen(&mut self) -> Result<(), DeviceError> {
        Err(DeviceError::Unsupported)
    }

    fn acquire_wake_lock(&mut self) -> Result<(), DeviceError> {
        Err(DeviceError::Unsupported)
    }

    fn release_wake_lock(&mut self, _lock: ()) {}
}

/// Fullscreen state plus the wake lock held while in it
pub(crate) struct PowerRetention<D: DisplayDevice> {
    device: D,
    fullscreen: bool,
    wake_lock: Option<D::WakeLock>,
}

impl<D: DisplayDevice> PowerRetention<D> {
    pub(crate) const fn new(device: D) -> Self {
        Self {
            device,
            fullscreen: false,
            wake_lock: None,
        }
    }

    pub(crate) const fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub(crate) const fn holds_wake_lock(&self) -> bool {
        self.wake_lock.is_some()
    }

    pub(crate) fn device(&self) -> &D {
        &self.device
    }

    pub(crate) fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub(crate) fn toggle(&mut self) {
        if self.fullscreen {
            self.leave();
        } else {
            self.enter();
        }
    }

    fn enter(&mut self) {
        if let Err(err) = self.device.request_fullscreen() {
            warn!("fullscreen request failed: {}", err);
            return;
        }
        self.fullscreen = true;

        match self.device.acquire_wake_lock() {
            Ok(lock) => {
                debug!("screen wake lock acquired");
                self.wake_lock = Some(lock);
            }
            Err(err) => debug!("screen wake lock unavailable: {}", err),
        }
    }

    fn leave(&mut self) {
        if let Err(err) = self.device.exit_fullscreen() {
            warn!("fullscreen exit failed: {}", err);
        }
        self.exited();
    }

    /// Fullscreen ended, either by request or by the platform
    pub(crate) fn exited(&mut self) {
        self.fullscreen = false;
        self.release();
    }

    /// Give the wake lock back, if held
    pub(crate) fn release(&mut self) {
        if let Some(lock) = self.wake_lock.take() {
            self.device.release_wake_lock(lock);
            debug!("screen wake lock released");
        }
    }
}
