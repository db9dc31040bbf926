// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Tag Event Reporter loop.
//!
//! `IDLE -> TAG_DETECTED -> (DEBOUNCED | SENDING -> (SUCCESS | FAILURE)) -> IDLE`
//!
//! Single-threaded and cooperative: the only suspension points are the
//! poll-interval sleep and the send itself. Nothing here ever terminates
//! the loop; every branch acknowledges the tag and returns to idle.

use embassy_net::Stack;
use embassy_time::{with_timeout, Duration, Instant, Timer};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use esp_hal::rng::Rng;
use log::{debug, error, info, warn};
use mfrc522::comm::Interface;
use mfrc522::{Initialized, Mfrc522};

use tagreport::debounce::Debounce;
use tagreport::reply::split_reply;
use tagreport::uid::format_uid;

use crate::buzzer::Buzzer;
use crate::client;
use crate::config::ReporterConfig;
use crate::display::StatusPanel;
use crate::errors::ReportError;
use crate::settings;

/// Polls the reader forever, reporting each accepted tag event once.
pub async fn run<COMM, I2C, D>(
    stack: Stack<'static>,
    rng: Rng,
    config: &'static ReporterConfig,
    mut rfid: Mfrc522<COMM, Initialized>,
    mut panel: StatusPanel<'_, '_, '_, I2C, D>,
    mut buzzer: Buzzer<'_>,
) -> !
where
    COMM: Interface,
    I2C: I2c,
    D: DelayNs,
{
    let mut debounce = Debounce::new(config.debounce_window_ms);
    panel.idle();
    info!(
        "reporter up: debounce {} ms, timeout {} ms",
        config.debounce_window_ms, config.request_timeout_ms
    );

    loop {
        Timer::after(Duration::from_millis(settings::POLL_INTERVAL_MS)).await;

        // REQA answers only for tags that are new to the field
        let atqa = match rfid.reqa() {
            Ok(atqa) => atqa,
            Err(_) => continue,
        };
        let uid = match rfid.select(&atqa) {
            Ok(uid) => uid,
            Err(_) => {
                debug!("tag select failed, re-polling");
                continue;
            }
        };

        buzzer.detect().await;

        let uid_str = match format_uid(uid.as_bytes(), settings::UID_SEPARATOR) {
            Ok(s) => s,
            Err(e) => {
                warn!("unrenderable UID ({} bytes): {}", uid.as_bytes().len(), e);
                let _ = rfid.hlta();
                continue;
            }
        };
        info!("card UID: {}", uid_str);

        if !debounce.try_accept(Instant::now().as_millis()) {
            info!("ignored (debounce)");
            let _ = rfid.hlta();
            panel.idle();
            continue;
        }

        panel.sending();

        let outcome = match with_timeout(
            Duration::from_millis(config.request_timeout_ms),
            client::send_report(stack, rng, config, uid_str.as_str()),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ReportError::Timeout),
        };

        match outcome {
            Ok(response) => {
                if response.status >= 400 {
                    // rendered like success on purpose; the server speaks
                    // through the body, the status only reaches the log
                    warn!("server answered {}", response.status);
                }
                info!("response ({}): {}", response.status, response.body);
                buzzer.success().await;
                panel.show_reply(&split_reply(response.body.as_str()));
            }
            Err(e) => {
                error!("send failed: {}", e);
                panel.show_error(&e);
                buzzer.error().await;
            }
        }

        // halt the PICC so the next poll can see a fresh presentation
        let _ = rfid.hlta();

        Timer::after(Duration::from_millis(settings::REPLY_HOLD_MS)).await;
        panel.idle();
    }
}
