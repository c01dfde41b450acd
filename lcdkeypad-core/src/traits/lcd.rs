//! Character-LCD driver seam
//!
//! The shield controller does not speak the LCD command protocol
//! itself. It owns a character-LCD driver and makes exactly one call
//! into it: geometry initialization during shield bring-up. Everything
//! else the driver offers (cursor positioning, writing text) stays on
//! the concrete driver type, which the controller hands back out
//! through its accessors.

/// The initialization contract a character-LCD driver must offer.
///
/// Implementors bring the controller out of reset and configure it for
/// the requested geometry; the shield calls this once with its fixed
/// 16x2 layout. Errors are the driver's own (typically the pin error
/// of the underlying bus) and propagate out of shield bring-up
/// untouched.
pub trait CharacterLcd {
    /// Error type of the underlying bus or transport
    type Error;

    /// Initialize the display for `cols` x `rows` characters.
    fn begin(&mut self, cols: u8, rows: u8) -> Result<(), Self::Error>;
}
