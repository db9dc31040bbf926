// SPDX-License-Identifier: MIT OR Apache-2.0

//! Status panel: a 16x2 HD44780 character LCD behind an I2C adapter.
//!
//! Every public method leaves the display in a complete, deterministic
//! state; callers never issue partial writes. Lines are truncated to the
//! 16 available cells, never wrapped.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::String;
use lcd1602_driver::command::State;
use lcd1602_driver::lcd::{self, Basic, Ext, Lcd};
use lcd1602_driver::sender::I2cSender;
use tagreport::reply::{truncate_line, ReplyLines, LCD_COLS};

use crate::errors::ReportError;
use crate::settings;

const LCD_POLL_INTERVAL_US: u32 = 10;

/// Builds the default sender for the panel's fixed I2C address.
pub fn sender<I2C: I2c>(i2c: &mut I2C) -> I2cSender<'_, I2C> {
    I2cSender::new(i2c, settings::LCD_I2C_ADDR)
}

pub struct StatusPanel<'s, 'd, 'i, I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    lcd: Lcd<'s, 'd, I2cSender<'i, I2C>, D>,
}

impl<'s, 'd, 'i, I2C, D> StatusPanel<'s, 'd, 'i, I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Initializes the controller and switches the backlight on.
    pub fn new(sender: &'s mut I2cSender<'i, I2C>, delayer: &'d mut D) -> Self {
        let mut lcd = Lcd::new(sender, delayer, lcd::Config::default(), LCD_POLL_INTERVAL_US);
        lcd.set_backlight(State::On);
        Self { lcd }
    }

    fn two_lines(&mut self, line1: &str, line2: &str) {
        self.lcd.clean_display();
        self.lcd.set_cursor_pos((0, 0));
        self.lcd.write_str_to_cur(truncate_line(line1).as_str());
        self.lcd.set_cursor_pos((0, 1));
        self.lcd.write_str_to_cur(truncate_line(line2).as_str());
    }

    pub fn booting(&mut self) {
        self.two_lines("RFID Attendance", "Connecting WiFi");
    }

    pub fn wifi_up(&mut self) {
        self.two_lines("WiFi connected", "");
    }

    pub fn wifi_down(&mut self) {
        self.two_lines("WiFi failed", "Check creds");
    }

    /// Prompt shown whenever the reporter is back to polling.
    pub fn idle(&mut self) {
        self.two_lines(settings::IDLE_PROMPT, "");
    }

    /// Shown while the send is in flight.
    pub fn sending(&mut self) {
        self.two_lines("Hello  Student", "Please wait");
    }

    pub fn show_reply(&mut self, reply: &ReplyLines) {
        let line2 = reply.line2.as_deref().unwrap_or("");
        self.two_lines(reply.line1.as_str(), line2);
    }

    pub fn show_error(&mut self, error: &ReportError) {
        let mut reason: String<LCD_COLS> = String::new();
        // the Display impl stays within one line; drop the tail if not
        let _ = write!(reason, "{error}");
        self.two_lines("HTTP Error", reason.as_str());
    }
}
