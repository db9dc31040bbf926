//! Buzzer pulse patterns for detect/success/error feedback.

use embassy_time::{Duration, Timer};
use esp_hal::gpio::Output;

use crate::settings;

pub struct Buzzer<'d> {
    pin: Output<'d>,
}

impl<'d> Buzzer<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }

    /// Single pulse of `ms` milliseconds.
    pub async fn beep(&mut self, ms: u64) {
        self.pin.set_high();
        Timer::after(Duration::from_millis(ms)).await;
        self.pin.set_low();
    }

    /// Short beep when a tag enters the field.
    pub async fn detect(&mut self) {
        self.beep(settings::DETECT_BEEP_MS).await;
    }

    /// Longer beep once a reply is on the display.
    pub async fn success(&mut self) {
        self.beep(settings::SUCCESS_BEEP_MS).await;
    }

    /// Repeated short pattern for a failed send.
    pub async fn error(&mut self) {
        for _ in 0..settings::ERROR_BEEP_COUNT {
            self.beep(settings::ERROR_BEEP_MS).await;
            Timer::after(Duration::from_millis(settings::ERROR_BEEP_MS)).await;
        }
    }
}
