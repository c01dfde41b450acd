//! Shield controller
//!
//! Ties the three hardware resources of the shield together: the
//! character LCD, the keypad ADC input, and the backlight pin. The
//! controller owns the backlight state and keeps the physical pin in
//! sync with it after every mutation; buttons are decoded fresh from
//! each ADC sample and no state is kept for them.
//!
//! # Usage
//!
//! ```ignore
//! let pinout = ShieldPinout::standard();
//! // ...construct lcd, adc, and backlight pin from the pinout with
//! // the platform HAL...
//! let mut shield = ShieldController::new(lcd, adc, backlight_pin);
//! shield.begin()?;
//!
//! match shield.read_button() {
//!     Button::Select => shield.backlight_off(),
//!     Button::Up => {
//!         let brighter = shield.backlight_level() as i32 + 16;
//!         shield.set_backlight_level_clamped(brighter);
//!     }
//!     _ => {}
//! }
//! ```

use lcdkeypad_core::backlight::{clamp_level, Backlight, BacklightDrive};
use lcdkeypad_core::button::Button;
use lcdkeypad_core::config::{LCD_COLS, LCD_ROWS};
use lcdkeypad_core::traits::CharacterLcd;

/// ADC sampling trait for the keypad input.
///
/// One call, one conversion. Implementations are expected to configure
/// the pin as an analog input at construction and to produce readings
/// in the 10-bit range the button bands are calibrated for.
pub trait AdcReader {
    /// Take a single sample (0-1023)
    fn read(&mut self) -> u16;
}

/// Backlight pin abstraction.
///
/// The pin must be configured as an output at construction. Off is a
/// hard digital low, not a zero-duty PWM, so implementations need both
/// operations.
pub trait BacklightPin {
    /// Drive the pin with PWM at the given duty (0-255)
    fn set_duty(&mut self, level: u8);

    /// Drive the pin to a steady digital low
    fn set_low(&mut self);
}

/// Controller for the LCD keypad shield.
///
/// Generic over the LCD driver, the keypad ADC, and the backlight pin
/// so the logic stays board-agnostic. Call [`begin`](Self::begin) or
/// [`begin_with`](Self::begin_with) once before anything else.
pub struct ShieldController<LCD, ADC, BL> {
    lcd: LCD,
    adc: ADC,
    backlight_pin: BL,
    backlight: Backlight,
}

impl<LCD, ADC, BL> ShieldController<LCD, ADC, BL>
where
    LCD: CharacterLcd,
    ADC: AdcReader,
    BL: BacklightPin,
{
    /// Create a controller from its hardware resources.
    ///
    /// No pin is touched and the LCD stays uninitialized until
    /// [`begin`](Self::begin) runs; until then the backlight state is
    /// off at level 0.
    pub fn new(lcd: LCD, adc: ADC, backlight_pin: BL) -> Self {
        Self {
            lcd,
            adc,
            backlight_pin,
            backlight: Backlight::default(),
        }
    }

    /// Initialize the shield with the backlight on at full brightness.
    pub fn begin(&mut self) -> Result<(), LCD::Error> {
        self.begin_with(true, 255)
    }

    /// Initialize the shield with an explicit backlight state.
    ///
    /// Stores the state, forces the backlight pin low before the first
    /// apply (so a floating output cannot flash the backlight during
    /// bring-up), applies the state, and initializes the LCD for its
    /// fixed 16x2 geometry. The only fallible step is the LCD
    /// initialization, whose error passes through.
    pub fn begin_with(&mut self, backlight_on: bool, level: u8) -> Result<(), LCD::Error> {
        self.backlight = Backlight::new(backlight_on, level);
        self.backlight_pin.set_low();
        self.apply_backlight();
        self.lcd.begin(LCD_COLS, LCD_ROWS)
    }

    /// Turn the backlight on at the stored brightness.
    pub fn backlight_on(&mut self) {
        self.backlight.set_on();
        self.apply_backlight();
    }

    /// Turn the backlight off. The stored brightness is kept.
    pub fn backlight_off(&mut self) {
        self.backlight.set_off();
        self.apply_backlight();
    }

    /// Store a new brightness without touching the on/off flag.
    ///
    /// If the backlight is on, the new brightness takes effect
    /// immediately; if off, it is latched for the next
    /// [`backlight_on`](Self::backlight_on).
    pub fn set_backlight_level(&mut self, level: u8) {
        self.backlight.set_level(level);
        self.apply_backlight();
    }

    /// Like [`set_backlight_level`](Self::set_backlight_level), for
    /// call sites holding a signed or wider value. Saturates into
    /// 0-255.
    pub fn set_backlight_level_clamped(&mut self, level: i32) {
        self.set_backlight_level(clamp_level(level));
    }

    /// Whether the backlight is currently on.
    pub fn is_backlight_on(&self) -> bool {
        self.backlight.is_on()
    }

    /// The stored backlight brightness.
    pub fn backlight_level(&self) -> u8 {
        self.backlight.level()
    }

    /// Sample the keypad once and decode the pressed button.
    ///
    /// Stateless: no debouncing, no press/release edges. The resistor
    /// ladder yields one voltage per press, so simultaneous presses
    /// read as whichever button pulls the ladder lowest.
    pub fn read_button(&mut self) -> Button {
        Button::from_adc(self.adc.read())
    }

    /// Borrow the LCD driver for text operations.
    pub fn lcd(&self) -> &LCD {
        &self.lcd
    }

    /// Mutably borrow the LCD driver for text operations.
    pub fn lcd_mut(&mut self) -> &mut LCD {
        &mut self.lcd
    }

    /// Tear the controller apart into its hardware resources.
    pub fn release(self) -> (LCD, ADC, BL) {
        (self.lcd, self.adc, self.backlight_pin)
    }

    /// Push the current backlight state out to the pin.
    fn apply_backlight(&mut self) {
        match self.backlight.drive() {
            BacklightDrive::Off => self.backlight_pin.set_low(),
            BacklightDrive::Pwm(level) => self.backlight_pin.set_duty(level),
        }
    }
}
