use super::ChannelEventSource;
use crate::error::{InputError, Result};
use crate::mode::InputEvent;
use std::time::{Duration, Instant};
use tracing::debug;

#[cfg(all(target_os = "linux", feature = "touch"))]
use tracing::{error, info, warn};

/// Reported range of one absolute axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRange {
    pub min: i32,
    pub max: i32,
}

impl AxisRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.max > self.min
    }

    /// Map a raw axis value onto `0..extent`, clamping values outside the range
    pub fn scale(&self, value: i32, extent: u32) -> i32 {
        if !self.is_valid() || extent == 0 {
            return value;
        }

        let span = self.max as i64 - self.min as i64;
        let offset = (value as i64 - self.min as i64).clamp(0, span);
        (offset * (extent as i64 - 1) / span) as i32
    }
}

/// Maps raw touch coordinates to display pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchCalibration {
    pub x: AxisRange,
    pub y: AxisRange,
    pub display_size: (u32, u32),
}

impl TouchCalibration {
    pub fn new(x: AxisRange, y: AxisRange, display_size: (u32, u32)) -> Self {
        Self { x, y, display_size }
    }

    pub fn map(&self, x: i32, y: i32) -> (i32, i32) {
        (
            self.x.scale(x, self.display_size.0),
            self.y.scale(y, self.display_size.1),
        )
    }
}

/// Folds raw touch reports into press events at the last known position
#[derive(Debug, Clone)]
pub struct TouchTracker {
    x: Option<i32>,
    y: Option<i32>,
    pressed: bool,
    last_press: Option<Instant>,
    debounce: Duration,
    calibration: Option<TouchCalibration>,
}

impl TouchTracker {
    pub fn new(debounce: Duration) -> Self {
        Self {
            x: None,
            y: None,
            pressed: false,
            last_press: None,
            debounce,
            calibration: None,
        }
    }

    /// Report presses in display pixels instead of raw device units
    pub fn with_calibration(mut self, calibration: TouchCalibration) -> Self {
        self.calibration = Some(calibration);
        self
    }

    pub fn calibration(&self) -> Option<TouchCalibration> {
        self.calibration
    }

    pub fn set_x(&mut self, x: i32) {
        self.x = Some(x);
    }

    pub fn set_y(&mut self, y: i32) {
        self.y = Some(y);
    }

    pub fn position(&self) -> (Option<i32>, Option<i32>) {
        (self.x, self.y)
    }

    /// Button or contact state change. Returns a pointer press on the
    /// down edge once a position is known and the debounce window has passed.
    pub fn button(&mut self, down: bool, now: Instant) -> Option<InputEvent> {
        let was_pressed = self.pressed;
        self.pressed = down;
        if !down || was_pressed {
            return None;
        }

        let (x, y) = match (self.x, self.y) {
            (Some(x), Some(y)) => (x, y),
            _ => {
                debug!("Touch press without a position, ignoring");
                return None;
            }
        };

        if let Some(last) = self.last_press {
            if now.duration_since(last) < self.debounce {
                debug!("Touch event debounced");
                return None;
            }
        }

        self.last_press = Some(now);
        let (x, y) = match self.calibration {
            Some(calibration) => calibration.map(x, y),
            None => (x, y),
        };
        Some(InputEvent::PointerDown { x, y })
    }
}

impl Default for TouchTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}

/// Detached evdev reader thread feeding pointer presses into a channel
pub struct TouchListener;

impl TouchListener {
    /// Open `device_path` and start reading it. Presses are reported in the
    /// pixel space of a `display_size` surface. The thread exits when the device
    /// fails repeatedly or the returned source is dropped.
    #[cfg(all(target_os = "linux", feature = "touch"))]
    pub fn spawn(device_path: &str, display_size: (u32, u32)) -> Result<ChannelEventSource> {
        use evdev::{AbsoluteAxisType, Device, EventType, InputEventKind, Key};

        let mut device = Device::open(device_path).map_err(|e| {
            let details = match e.kind() {
                std::io::ErrorKind::NotFound => "device not found".to_string(),
                std::io::ErrorKind::PermissionDenied => "permission denied".to_string(),
                _ => e.to_string(),
            };
            InputError::Device {
                device: device_path.to_string(),
                details,
            }
        })?;

        let supports_touch = device.supported_events().contains(EventType::KEY)
            && device
                .supported_keys()
                .map(|keys| keys.contains(Key::BTN_TOUCH) || keys.contains(Key::BTN_LEFT))
                .unwrap_or(false);
        if !supports_touch {
            return Err(InputError::Device {
                device: device_path.to_string(),
                details: "device reports no touch or button keys".to_string(),
            }
            .into());
        }

        info!(
            "Touch device opened: {} ({})",
            device_path,
            device.name().unwrap_or("Unknown")
        );

        let mut tracker = TouchTracker::default();
        match device.get_abs_state() {
            Ok(state) => {
                let range = |axis: AbsoluteAxisType| {
                    let info = state[axis.0 as usize];
                    AxisRange::new(info.minimum, info.maximum)
                };
                let pick = |single: AbsoluteAxisType, multi: AbsoluteAxisType| {
                    let range_single = range(single);
                    if range_single.is_valid() {
                        range_single
                    } else {
                        range(multi)
                    }
                };

                let x = pick(AbsoluteAxisType::ABS_X, AbsoluteAxisType::ABS_MT_POSITION_X);
                let y = pick(AbsoluteAxisType::ABS_Y, AbsoluteAxisType::ABS_MT_POSITION_Y);
                if x.is_valid() && y.is_valid() {
                    info!(
                        "Touch axes x {}..{}, y {}..{} mapped to {}x{}",
                        x.min, x.max, y.min, y.max, display_size.0, display_size.1
                    );
                    tracker = tracker.with_calibration(TouchCalibration::new(x, y, display_size));
                } else {
                    warn!("Touch device reports no axis ranges, using raw coordinates");
                }
            }
            Err(e) => warn!("Failed to read touch axis ranges, using raw coordinates: {}", e),
        }

        let (sender, source) = ChannelEventSource::pair("touch");
        let path = device_path.to_string();

        std::thread::Builder::new()
            .name("touch-listener".to_string())
            .spawn(move || {
                const MAX_CONSECUTIVE_ERRORS: u32 = 5;
                let mut consecutive_errors = 0;

                loop {
                    let events = match device.fetch_events() {
                        Ok(events) => {
                            consecutive_errors = 0;
                            events
                        }
                        Err(e) => {
                            consecutive_errors += 1;
                            if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                                error!("Too many consecutive errors reading {}: {}", path, e);
                                return;
                            }
                            warn!(
                                "Error reading from touch device (attempt {}): {}",
                                consecutive_errors, e
                            );
                            std::thread::sleep(Duration::from_millis(100));
                            continue;
                        }
                    };

                    for event in events {
                        let press = match event.kind() {
                            InputEventKind::AbsAxis(axis) => {
                                match axis {
                                    evdev::AbsoluteAxisType::ABS_X
                                    | evdev::AbsoluteAxisType::ABS_MT_POSITION_X => {
                                        tracker.set_x(event.value())
                                    }
                                    evdev::AbsoluteAxisType::ABS_Y
                                    | evdev::AbsoluteAxisType::ABS_MT_POSITION_Y => {
                                        tracker.set_y(event.value())
                                    }
                                    _ => {}
                                }
                                None
                            }
                            InputEventKind::Key(Key::BTN_TOUCH | Key::BTN_LEFT) => {
                                match event.value() {
                                    1 => tracker.button(true, Instant::now()),
                                    0 => tracker.button(false, Instant::now()),
                                    _ => None,
                                }
                            }
                            _ => None,
                        };

                        if let Some(press) = press {
                            debug!("Touch event: {:?}", press);
                            if sender.send(press).is_err() {
                                debug!("Touch receiver dropped, stopping listener");
                                return;
                            }
                        }
                    }
                }
            })
            .map_err(|e| InputError::Device {
                device: device_path.to_string(),
                details: format!("Failed to start listener thread: {}", e),
            })?;

        Ok(source)
    }

    #[cfg(not(all(target_os = "linux", feature = "touch")))]
    pub fn spawn(device_path: &str, _display_size: (u32, u32)) -> Result<ChannelEventSource> {
        Err(InputError::Device {
            device: device_path.to_string(),
            details: "touch support is not compiled in (requires Linux and the touch feature)"
                .to_string(),
        }
        .into())
    }
}
