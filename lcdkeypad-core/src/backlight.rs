//! Backlight state
//!
//! The shield's backlight sits on a single PWM-capable pin. Brightness
//! and on/off are independent: turning the backlight off keeps the
//! stored brightness, and storing a new brightness never flips the
//! on/off flag. The physical output is a pure function of the pair,
//! computed by [`Backlight::drive`] and applied by whoever owns the
//! pin.

/// What the backlight pin should be doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BacklightDrive {
    /// Pin held at digital low (backlight off, no PWM)
    Off,
    /// Pin driven with PWM at the given duty (0 = dark, 255 = full)
    Pwm(u8),
}

/// Backlight on/off flag plus stored brightness.
///
/// Defaults to off at level 0 until initialization stores real values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Backlight {
    on: bool,
    level: u8,
}

impl Backlight {
    /// Create backlight state with an explicit flag and level.
    pub const fn new(on: bool, level: u8) -> Self {
        Self { on, level }
    }

    /// Turn the backlight on. Brightness is whatever was last stored.
    pub fn set_on(&mut self) {
        self.on = true;
    }

    /// Turn the backlight off. The stored brightness is kept.
    pub fn set_off(&mut self) {
        self.on = false;
    }

    /// Store a new brightness without touching the on/off flag.
    pub fn set_level(&mut self, level: u8) {
        self.level = level;
    }

    /// Whether the backlight is currently on.
    pub const fn is_on(&self) -> bool {
        self.on
    }

    /// The stored brightness (meaningful even while off).
    pub const fn level(&self) -> u8 {
        self.level
    }

    /// Compute the physical drive for the current state.
    pub const fn drive(&self) -> BacklightDrive {
        if self.on {
            BacklightDrive::Pwm(self.level)
        } else {
            BacklightDrive::Off
        }
    }
}

/// Saturate a wider signed value into the 0-255 brightness range.
///
/// Callers holding a `u8` can pass it straight to
/// [`Backlight::set_level`]; this is the conversion for call sites
/// computing with signed or wider integers. Saturating, not wrapping:
/// negative values become 0 and values above 255 become 255.
pub const fn clamp_level(level: i32) -> u8 {
    if level > 255 {
        255
    } else if level < 0 {
        0
    } else {
        level as u8
    }
}
