//! Hardware driver implementations
//!
//! This crate provides concrete implementations over the traits
//! defined in lcdkeypad-core:
//!
//! - Shield controller (backlight, keypad, LCD bring-up)
//! - HD44780 character-LCD driver for the shield's 4-bit bus

#![no_std]
#![deny(unsafe_code)]

pub mod hd44780;
pub mod shield;
