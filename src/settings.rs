// SPDX-License-Identifier: MIT OR Apache-2.0

// Static settings

// Attendance endpoint (a Google Apps Script style deployment). Override at
// build time with REPORT_URL; the deployed sheet answers "line1|line2".
pub(crate) const DEFAULT_REPORT_URL: &str =
    "https://script.google.com/macros/s/REPLACE_WITH_DEPLOYMENT_ID/exec";
pub(crate) const DEFAULT_UID_PARAM: &str = "cardUID";

pub(crate) const DEFAULT_SSID: &str = "tap-stamp";

// Reporter cadence
pub(crate) const DEBOUNCE_WINDOW_MS: u64 = 2000;
pub(crate) const REQUEST_TIMEOUT_MS: u64 = 10_000;
pub(crate) const POLL_INTERVAL_MS: u64 = 50;
pub(crate) const REPLY_HOLD_MS: u64 = 3000;

// UID rendering
pub(crate) const UID_SEPARATOR: char = '-';

// Display
pub(crate) const LCD_I2C_ADDR: u8 = 0x27;
pub(crate) const IDLE_PROMPT: &str = "Ready, Tap card.";

// Buzzer
pub(crate) const DETECT_BEEP_MS: u64 = 200;
pub(crate) const SUCCESS_BEEP_MS: u64 = 500;
pub(crate) const ERROR_BEEP_MS: u64 = 150;
pub(crate) const ERROR_BEEP_COUNT: u32 = 3;

// Networking
pub(crate) const WIFI_UP_TIMEOUT_MS: u64 = 15_000;
pub(crate) const DNS_TIMEOUT_MS: u64 = 3_000;
pub(crate) const CONNECT_TIMEOUT_MS: u64 = 3_000;
pub(crate) const MAX_REDIRECT_HOPS: u8 = 2;
pub(crate) const RESPONSE_LIMIT: usize = 4096;
