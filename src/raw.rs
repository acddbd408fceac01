//! Unbuffered, unechoed terminal input
//!
//! [`RawMode`] brackets a terminal device's line discipline. Entering raw
//! mode yields a [`RawModeGuard`]; the original mode is reapplied when the
//! guard is exited or dropped, whichever path the caller takes out of the
//! bracketed operation.
//!
//! [`RawMode`]: struct.RawMode.html
//! [`RawModeGuard`]: struct.RawModeGuard.html

use std::fmt;
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::device::{Device, Size};
use crate::sys::Console;

/// Configures how raw mode is derived from the terminal's current mode.
///
/// This struct implements the [`Default`] trait, providing default
/// values for all options.
///
/// ```no_run
/// use termplus::{RawConfig, RawMode};
///
/// let raw = RawMode::with_config(RawConfig{
///     block_signals: true,
///     .. RawConfig::default()
/// });
/// # drop(raw);
/// ```
///
/// [`Default`]: https://doc.rust-lang.org/std/default/trait.Default.html
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RawConfig {
    /// Whether to block signals that result from user input.
    ///
    /// If `true`, e.g. when the user presses Ctrl-C, the byte `0x03` will
    /// be read instead of the process receiving an interrupt.
    ///
    /// The default is `false`, leaving signal generation as it was.
    pub block_signals: bool,
    /// Whether to disable control flow characters.
    ///
    /// If `true`, Ctrl-S and Ctrl-Q are read as ordinary input.
    ///
    /// The default is `false`, leaving control flow as it was.
    ///
    /// # Notes
    ///
    /// On Windows, this setting has no effect.
    pub block_control_flow: bool,
}

struct Nesting<M> {
    depth: usize,
    original: Option<M>,
}

/// Enters and leaves raw input mode on a terminal device.
///
/// Raw mode disables line buffering and echo, so that each byte typed is
/// available to the program as soon as it is entered.
///
/// Raw mode may be entered again while already active. Only the outermost
/// [`enter`] captures the terminal's mode and only the outermost exit
/// restores it, so the mode reapplied at the end is always the one found
/// before the first `enter`.
///
/// Raw mode applies to the whole process. Only one thread should perform
/// raw-mode input at a time.
///
/// [`enter`]: #method.enter
pub struct RawMode<D: Device = Console> {
    device: D,
    config: RawConfig,
    nesting: Mutex<Nesting<D::Mode>>,
    last_size: Mutex<Size>,
}

/// Restores the terminal's original input mode when exited or dropped
///
/// A value of this type is returned by [`RawMode::enter`].
///
/// [`RawMode::enter`]: struct.RawMode.html#method.enter
#[must_use = "raw mode is left as soon as the guard is dropped"]
pub struct RawModeGuard<'a, D: Device = Console> {
    raw: &'a RawMode<D>,
    previous: D::Mode,
    active: bool,
}

impl RawMode<Console> {
    /// Creates a controller for the terminal on `stdin`/`stdout`.
    pub fn new() -> RawMode<Console> {
        RawMode::with_device(Console::stdout())
    }

    /// Creates a controller for the terminal on `stdin`/`stdout`
    /// using the given configuration.
    pub fn with_config(config: RawConfig) -> RawMode<Console> {
        RawMode::with_device_config(Console::stdout(), config)
    }
}

impl Default for RawMode<Console> {
    fn default() -> RawMode<Console> {
        RawMode::new()
    }
}

impl<D: Device> RawMode<D> {
    /// Creates a controller for the given device.
    ///
    /// The current terminal size is captured for use by [`is_resized`].
    ///
    /// [`is_resized`]: #method.is_resized
    pub fn with_device(device: D) -> RawMode<D> {
        RawMode::with_device_config(device, RawConfig::default())
    }

    /// Creates a controller for the given device and configuration.
    pub fn with_device_config(device: D, config: RawConfig) -> RawMode<D> {
        let size = query_size(&device);

        RawMode{
            device,
            config,
            nesting: Mutex::new(Nesting{
                depth: 0,
                original: None,
            }),
            last_size: Mutex::new(size),
        }
    }

    /// Returns the underlying device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Returns the configuration used to derive raw mode.
    pub fn config(&self) -> &RawConfig {
        &self.config
    }

    /// Returns whether raw mode is currently entered through this controller.
    pub fn is_active(&self) -> bool {
        self.lock_nesting().depth != 0
    }

    /// Enters raw mode.
    ///
    /// If raw mode is not already active, the terminal's current mode is
    /// captured and an unbuffered, unechoed mode derived from it is
    /// applied immediately.
    ///
    /// If the current mode cannot be read or the raw mode cannot be applied,
    /// the terminal is left in its current mode and an error is returned.
    ///
    /// If an earlier attempt to restore the original mode failed, that mode
    /// is kept and is restored when this raw mode is left, rather than
    /// capturing the terminal's current, still raw, mode.
    pub fn enter(&self) -> io::Result<RawModeGuard<D>> {
        let mut nesting = self.lock_nesting();

        let previous = match nesting.original.clone() {
            Some(original) if nesting.depth != 0 => original,
            retained => {
                // A mode is retained at depth zero only if restoring it failed;
                // it remains the mode to return to.
                let original = match retained {
                    Some(original) => original,
                    None => self.device.get_mode()?,
                };
                let raw = self.device.raw_mode(&original, &self.config);

                self.device.set_mode(&raw)?;
                nesting.original = Some(original.clone());
                original
            }
        };

        nesting.depth += 1;

        Ok(RawModeGuard{
            raw: self,
            previous,
            active: true,
        })
    }

    /// Enters raw mode, or returns `None` if the terminal mode cannot be
    /// changed, in which case input operations proceed in the current mode.
    pub(crate) fn try_enter(&self) -> Option<RawModeGuard<D>> {
        match self.enter() {
            Ok(guard) => Some(guard),
            Err(e) => {
                tracing::debug!("raw mode unavailable: {}", e);
                None
            }
        }
    }

    /// Returns the size of the terminal.
    ///
    /// Returns a size of zero width and zero height if the size cannot be
    /// determined, e.g. when output is not a terminal.
    pub fn dimensions(&self) -> Size {
        query_size(&self.device)
    }

    /// Returns whether at least one byte of input is available.
    ///
    /// No input is consumed and this method does not wait for input.
    /// Returns `false` if the number of available bytes cannot be determined.
    pub fn has_pending_input(&self) -> bool {
        let _guard = self.try_enter();

        match self.device.pending_input() {
            Ok(n) => n > 0,
            Err(e) => {
                tracing::debug!("failed to query pending input: {}", e);
                false
            }
        }
    }

    /// Queries the terminal size and compares it with `previous`.
    ///
    /// Returns whether the size differs, along with the new size.
    pub fn resized(&self, previous: Size) -> (bool, Size) {
        let size = self.dimensions();
        (size != previous, size)
    }

    /// Queries the terminal size and compares it with the size last seen
    /// by this controller.
    ///
    /// The first comparison is made against the size captured when the
    /// controller was created. Intended to be called from within a loop,
    /// in order to detect changes to the terminal window size.
    pub fn is_resized(&self) -> (bool, Size) {
        let mut last = self.last_size.lock()
            .unwrap_or_else(PoisonError::into_inner);

        let (changed, size) = self.resized(*last);
        *last = size;

        (changed, size)
    }

    fn lock_nesting(&self) -> MutexGuard<Nesting<D::Mode>> {
        self.nesting.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn leave(&self) -> io::Result<()> {
        let mut nesting = self.lock_nesting();

        nesting.depth = nesting.depth.saturating_sub(1);

        if nesting.depth == 0 {
            if let Some(original) = nesting.original.clone() {
                self.device.set_mode(&original)?;
                nesting.original = None;
            }
        }

        Ok(())
    }
}

impl<D: Device> fmt::Debug for RawMode<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RawMode")
            .field("config", &self.config)
            .field("depth", &self.lock_nesting().depth)
            .finish()
    }
}

impl<'a, D: Device> RawModeGuard<'a, D> {
    /// Returns the input mode captured before raw mode was first entered.
    pub fn previous(&self) -> &D::Mode {
        &self.previous
    }

    /// Leaves raw mode.
    ///
    /// If this guard belongs to the outermost [`RawMode::enter`] call,
    /// the original input mode is reapplied.
    ///
    /// [`RawMode::enter`]: struct.RawMode.html#method.enter
    pub fn exit(mut self) -> io::Result<()> {
        self.active = false;
        self.raw.leave()
    }
}

impl<'a, D: Device> Drop for RawModeGuard<'a, D> {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = self.raw.leave() {
                tracing::warn!("failed to restore terminal mode: {}", e);
            }
        }
    }
}

fn query_size<D: Device>(device: &D) -> Size {
    device.size().unwrap_or_else(|e| {
        tracing::debug!("failed to query terminal size: {}", e);
        Size::default()
    })
}

#[cfg(test)]
mod test {
    use super::{RawConfig, RawMode};
    use crate::device::Size;
    use crate::device::mock::{MockDevice, MockMode};

    #[test]
    fn test_round_trip() {
        let dev = MockDevice::new();
        let raw = RawMode::with_device(dev.clone());
        let original = dev.mode();

        let guard = raw.enter().unwrap();
        assert!(!dev.mode().canonical);
        assert!(!dev.mode().echo);
        assert_eq!(*guard.previous(), original);

        guard.exit().unwrap();
        assert_eq!(dev.mode(), original);
        assert!(!raw.is_active());
    }

    #[test]
    fn test_restore_on_early_return() {
        fn read_then_fail(raw: &RawMode<MockDevice>) -> Result<(), ()> {
            let _guard = raw.enter().map_err(|_| ())?;
            Err(())
        }

        let dev = MockDevice::new();
        let raw = RawMode::with_device(dev.clone());

        assert!(read_then_fail(&raw).is_err());
        assert_eq!(dev.mode(), MockMode::default());
    }

    #[test]
    fn test_restore_on_panic() {
        let dev = MockDevice::new();
        let raw = RawMode::with_device(dev.clone());

        let r = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = raw.enter().unwrap();
            panic!("input handler failed");
        }));

        assert!(r.is_err());
        assert_eq!(dev.mode(), MockMode::default());
    }

    #[test]
    fn test_nested_keeps_original() {
        let dev = MockDevice::new();
        let raw = RawMode::with_device(dev.clone());

        let outer = raw.enter().unwrap();
        let inner = raw.enter().unwrap();

        // The inner guard reports the first captured state, not the raw one
        assert_eq!(*inner.previous(), MockMode::default());
        assert_eq!(dev.state().mode_sets, 1);

        drop(inner);
        assert!(!dev.mode().canonical);
        assert!(raw.is_active());

        drop(outer);
        assert_eq!(dev.mode(), MockMode::default());
        assert_eq!(dev.state().mode_sets, 2);
    }

    #[test]
    fn test_failed_restore_keeps_original() {
        let dev = MockDevice::new();
        let raw = RawMode::with_device(dev.clone());

        let guard = raw.enter().unwrap();
        dev.state().fail_set_mode = true;
        assert!(guard.exit().is_err());
        assert!(!raw.is_active());
        assert!(!dev.mode().canonical);

        dev.state().fail_set_mode = false;

        // The terminal is still raw; the cooked mode must not be lost
        let guard = raw.enter().unwrap();
        assert_eq!(*guard.previous(), MockMode::default());

        guard.exit().unwrap();
        assert_eq!(dev.mode(), MockMode::default());

        // Once restored, the next entry captures afresh
        let guard = raw.enter().unwrap();
        assert_eq!(*guard.previous(), MockMode::default());
        drop(guard);
        assert_eq!(dev.mode(), MockMode::default());
    }

    #[test]
    fn test_enter_failure_leaves_mode() {
        let dev = MockDevice::new();
        dev.state().fail_get_mode = true;

        let raw = RawMode::with_device(dev.clone());

        assert!(raw.enter().is_err());
        assert!(raw.try_enter().is_none());
        assert!(!raw.is_active());
        assert_eq!(dev.state().mode_sets, 0);
    }

    #[test]
    fn test_block_signals() {
        let dev = MockDevice::new();
        let raw = RawMode::with_device_config(dev.clone(), RawConfig{
            block_signals: true,
            .. RawConfig::default()
        });

        let _guard = raw.enter().unwrap();
        assert!(!dev.mode().signals);
    }

    #[test]
    fn test_pending_input() {
        let dev = MockDevice::new();
        let raw = RawMode::with_device(dev.clone());

        assert!(!raw.has_pending_input());

        dev.push_input(b"x");
        assert!(raw.has_pending_input());
        // Probing consumes nothing and restores the mode
        assert_eq!(dev.state().input.len(), 1);
        assert_eq!(dev.mode(), MockMode::default());

        dev.state().fail_pending = true;
        assert!(!raw.has_pending_input());
    }

    #[test]
    fn test_dimensions() {
        let dev = MockDevice::new();
        dev.set_size(80, 24);

        let raw = RawMode::with_device(dev.clone());
        assert_eq!(raw.dimensions(), Size::new(80, 24));

        dev.state().fail_size = true;
        assert_eq!(raw.dimensions(), Size::new(0, 0));
    }

    #[test]
    fn test_resized() {
        let dev = MockDevice::new();
        dev.set_size(80, 24);

        let raw = RawMode::with_device(dev.clone());

        assert_eq!(raw.is_resized(), (false, Size::new(80, 24)));

        dev.set_size(100, 30);
        assert_eq!(raw.is_resized(), (true, Size::new(100, 30)));
        assert_eq!(raw.is_resized(), (false, Size::new(100, 30)));

        assert_eq!(raw.resized(Size::new(80, 24)), (true, Size::new(100, 30)));
        assert_eq!(raw.resized(Size::new(100, 30)), (false, Size::new(100, 30)));
    }
}
