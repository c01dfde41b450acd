//! Keypad button identification
//!
//! The shield multiplexes five buttons onto one analog input through a
//! resistor ladder, so each button produces a distinct voltage and a
//! single 10-bit ADC sample identifies the pressed button. The ladder
//! produces one voltage per press; simultaneous presses cannot be told
//! apart. That is a hardware property of the shield, not something a
//! driver can fix.

/// Upper ADC bound (exclusive) for the RIGHT button.
pub const RIGHT_BAND: u16 = 75;
/// Upper ADC bound (exclusive) for the UP button.
pub const UP_BAND: u16 = 250;
/// Upper ADC bound (exclusive) for the DOWN button.
pub const DOWN_BAND: u16 = 400;
/// Upper ADC bound (exclusive) for the LEFT button.
pub const LEFT_BAND: u16 = 600;
/// Upper ADC bound (exclusive) for the SELECT button.
pub const SELECT_BAND: u16 = 900;

/// A button on the shield's keypad, or no press at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// No button pressed (or the reading fell outside every band)
    #[default]
    None,
    Right,
    Up,
    Down,
    Left,
    Select,
}

impl Button {
    /// Decode a raw ADC sample into a button.
    ///
    /// Bands are evaluated in increasing order and the first match
    /// wins. The thresholds are calibration values for the resistor
    /// ladder on the physical shield; anything at or above the SELECT
    /// band (including an idle input near full scale) reads as
    /// [`Button::None`].
    pub const fn from_adc(adc_value: u16) -> Self {
        if adc_value < RIGHT_BAND {
            Button::Right
        } else if adc_value < UP_BAND {
            Button::Up
        } else if adc_value < DOWN_BAND {
            Button::Down
        } else if adc_value < LEFT_BAND {
            Button::Left
        } else if adc_value < SELECT_BAND {
            Button::Select
        } else {
            Button::None
        }
    }

    /// Check if this is an actual press (anything but [`Button::None`]).
    pub const fn is_pressed(&self) -> bool {
        !matches!(self, Button::None)
    }
}
