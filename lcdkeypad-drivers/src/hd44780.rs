//! HD44780 character LCD driver
//!
//! Write-only driver for the HD44780 controller behind the shield's
//! six-pin interface: register select, enable strobe, and the upper
//! four data lines. The shield ties R/W to ground, so the busy flag
//! cannot be polled and every instruction is followed by a worst-case
//! wait instead.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use lcdkeypad_core::traits::CharacterLcd;

/// HD44780 instruction set
#[allow(dead_code)]
mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const CURSOR_SHIFT: u8 = 0x10;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_CGRAM_ADDR: u8 = 0x40;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    // Entry mode flags
    pub const ENTRY_INCREMENT: u8 = 0x02;
    // Display control flags
    pub const DISPLAY_ON: u8 = 0x04;
    // Function set flags
    pub const TWO_LINES: u8 = 0x08;
    pub const FONT_5X10: u8 = 0x04;
}

/// DDRAM start address of a row.
///
/// Rows 0 and 1 are fixed; on four-row panels rows 2 and 3 continue
/// rows 0 and 1 after `cols` characters.
const fn row_offset(cols: u8, row: u8) -> u8 {
    match row {
        0 => 0x00,
        1 => 0x40,
        2 => cols,
        _ => 0x40 + cols,
    }
}

/// HD44780 driver on a 4-bit bus.
///
/// Generic over the six output pins (sharing one error type, as they
/// do on any single HAL) and a delay provider for the controller's
/// instruction timing.
pub struct Hd44780<RS, EN, D4, D5, D6, D7, DELAY> {
    rs: RS,
    en: EN,
    d4: D4,
    d5: D5,
    d6: D6,
    d7: D7,
    delay: DELAY,
    cols: u8,
    rows: u8,
}

impl<RS, EN, D4, D5, D6, D7, DELAY, E> Hd44780<RS, EN, D4, D5, D6, D7, DELAY>
where
    RS: OutputPin<Error = E>,
    EN: OutputPin<Error = E>,
    D4: OutputPin<Error = E>,
    D5: OutputPin<Error = E>,
    D6: OutputPin<Error = E>,
    D7: OutputPin<Error = E>,
    DELAY: DelayNs,
{
    /// Create a driver from the bus pins.
    ///
    /// The display is not touched until [`begin`](Self::begin) runs.
    pub fn new(rs: RS, en: EN, d4: D4, d5: D5, d6: D6, d7: D7, delay: DELAY) -> Self {
        Self {
            rs,
            en,
            d4,
            d5,
            d6,
            d7,
            delay,
            cols: 0,
            rows: 0,
        }
    }

    /// Bring the controller out of reset and configure the geometry.
    ///
    /// Runs the datasheet's initialize-by-instruction sequence: the
    /// controller may have powered up in either bus width, so 8-bit
    /// mode is forced three times before dropping to 4-bit.
    pub fn begin(&mut self, cols: u8, rows: u8) -> Result<(), E> {
        self.cols = cols;
        self.rows = if rows == 0 { 1 } else { rows };

        // The controller needs >40 ms after Vcc before it accepts
        // instructions
        self.delay.delay_ms(50);
        self.rs.set_low()?;
        self.en.set_low()?;

        self.write_nibble(0x03)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x03)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x03)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02)?;

        let mut function = cmd::FUNCTION_SET;
        if self.rows > 1 {
            function |= cmd::TWO_LINES;
        }
        self.command(function)?;
        self.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON)?;
        self.clear()?;
        self.command(cmd::ENTRY_MODE_SET | cmd::ENTRY_INCREMENT)?;

        Ok(())
    }

    /// Blank the display and return the cursor to the origin.
    pub fn clear(&mut self) -> Result<(), E> {
        self.command(cmd::CLEAR_DISPLAY)?;
        // Clear and home are the two slow instructions (1.52 ms)
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Return the cursor to the origin without blanking.
    pub fn home(&mut self) -> Result<(), E> {
        self.command(cmd::RETURN_HOME)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Move the cursor to a column and row (both zero-based).
    ///
    /// Rows beyond the configured geometry address the last row, the
    /// same forgiving behavior the stock Arduino driver has.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), E> {
        let row = row.min(self.rows.saturating_sub(1));
        self.command(cmd::SET_DDRAM_ADDR | (col + row_offset(self.cols, row)))
    }

    /// Write one raw character cell (HD44780 character set).
    pub fn write_byte(&mut self, byte: u8) -> Result<(), E> {
        self.rs.set_high()?;
        self.write_raw(byte)
    }

    /// Write a string at the cursor, advancing as the entry mode set
    /// during [`begin`](Self::begin) dictates.
    pub fn write_str(&mut self, text: &str) -> Result<(), E> {
        for byte in text.bytes() {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Send an instruction byte.
    fn command(&mut self, byte: u8) -> Result<(), E> {
        self.rs.set_low()?;
        self.write_raw(byte)
    }

    /// Clock a full byte out as two nibbles, high first.
    fn write_raw(&mut self, byte: u8) -> Result<(), E> {
        self.write_nibble(byte >> 4)?;
        self.write_nibble(byte & 0x0F)?;
        // Ordinary instructions finish in 37 us; without the busy flag,
        // wait it out
        self.delay.delay_us(50);
        Ok(())
    }

    /// Put a nibble on D4-D7 and strobe enable.
    fn write_nibble(&mut self, nibble: u8) -> Result<(), E> {
        set_level(&mut self.d4, nibble & 0x01 != 0)?;
        set_level(&mut self.d5, nibble & 0x02 != 0)?;
        set_level(&mut self.d6, nibble & 0x04 != 0)?;
        set_level(&mut self.d7, nibble & 0x08 != 0)?;

        // Enable pulse width must exceed 450 ns
        self.en.set_high()?;
        self.delay.delay_us(1);
        self.en.set_low()?;
        self.delay.delay_us(1);
        Ok(())
    }
}

impl<RS, EN, D4, D5, D6, D7, DELAY, E> CharacterLcd for Hd44780<RS, EN, D4, D5, D6, D7, DELAY>
where
    RS: OutputPin<Error = E>,
    EN: OutputPin<Error = E>,
    D4: OutputPin<Error = E>,
    D5: OutputPin<Error = E>,
    D6: OutputPin<Error = E>,
    D7: OutputPin<Error = E>,
    DELAY: DelayNs,
{
    type Error = E;

    fn begin(&mut self, cols: u8, rows: u8) -> Result<(), E> {
        Hd44780::begin(self, cols, rows)
    }
}

fn set_level<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), P::Error> {
    if high {
        pin.set_high()
    } else {
        pin.set_low()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Mock GPIO pin counting rising edges
    #[derive(Default)]
    struct MockPin {
        high: bool,
        rises: usize,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            if !self.high {
                self.rises += 1;
            }
            self.high = true;
            Ok(())
        }
    }

    /// Delay provider for host tests; timing is irrelevant here
    struct NoopDelay;

    impl DelayNs for NoopDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    type MockLcd = Hd44780<MockPin, MockPin, MockPin, MockPin, MockPin, MockPin, NoopDelay>;

    fn lcd() -> MockLcd {
        Hd44780::new(
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
            NoopDelay,
        )
    }

    fn data_nibble(lcd: &MockLcd) -> u8 {
        (lcd.d4.high as u8)
            | (lcd.d5.high as u8) << 1
            | (lcd.d6.high as u8) << 2
            | (lcd.d7.high as u8) << 3
    }

    #[test]
    fn test_row_offsets() {
        assert_eq!(row_offset(16, 0), 0x00);
        assert_eq!(row_offset(16, 1), 0x40);
        assert_eq!(row_offset(20, 2), 20);
        assert_eq!(row_offset(20, 3), 0x40 + 20);
    }

    #[test]
    fn test_begin_strobe_count() {
        let mut lcd = lcd();
        lcd.begin(16, 2).unwrap();

        // Four reset nibbles plus four commands of two nibbles each
        assert_eq!(lcd.en.rises, 12);
        // Initialization ends on an instruction, not data
        assert!(!lcd.rs.high);
        // Last instruction is entry mode set (0x06): low nibble 0b0110
        assert_eq!(data_nibble(&lcd), 0x06);
    }

    #[test]
    fn test_write_byte_is_two_strobes_of_data() {
        let mut lcd = lcd();
        lcd.begin(16, 2).unwrap();
        let strobes = lcd.en.rises;

        lcd.write_byte(b'H').unwrap();
        assert_eq!(lcd.en.rises, strobes + 2);
        assert!(lcd.rs.high);
        // 'H' = 0x48, low nibble last on the bus
        assert_eq!(data_nibble(&lcd), 0x08);
    }

    #[test]
    fn test_write_str_advances_per_byte() {
        let mut lcd = lcd();
        lcd.begin(16, 2).unwrap();
        let strobes = lcd.en.rises;

        lcd.write_str("Hi").unwrap();
        assert_eq!(lcd.en.rises, strobes + 4);
    }

    #[test]
    fn test_set_cursor_addresses_second_row() {
        let mut lcd = lcd();
        lcd.begin(16, 2).unwrap();

        lcd.set_cursor(3, 1).unwrap();
        // SET_DDRAM_ADDR | 0x43 = 0xC3, low nibble 0x3
        assert!(!lcd.rs.high);
        assert_eq!(data_nibble(&lcd), 0x03);
    }

    #[test]
    fn test_set_cursor_clamps_row() {
        let mut a = lcd();
        a.begin(16, 2).unwrap();
        a.set_cursor(5, 7).unwrap();

        let mut b = lcd();
        b.begin(16, 2).unwrap();
        b.set_cursor(5, 1).unwrap();

        assert_eq!(data_nibble(&a), data_nibble(&b));
        assert_eq!(a.en.rises, b.en.rises);
    }

    #[test]
    fn test_clear_is_single_instruction() {
        let mut lcd = lcd();
        lcd.begin(16, 2).unwrap();
        let strobes = lcd.en.rises;

        lcd.clear().unwrap();
        assert_eq!(lcd.en.rises, strobes + 2);
        // CLEAR_DISPLAY = 0x01
        assert_eq!(data_nibble(&lcd), 0x01);
    }

    #[test]
    fn test_begin_through_trait() {
        fn init<L: CharacterLcd>(lcd: &mut L) -> Result<(), L::Error> {
            lcd.begin(16, 2)
        }

        let mut lcd = lcd();
        init(&mut lcd).unwrap();
        assert_eq!(lcd.en.rises, 12);
    }
}
