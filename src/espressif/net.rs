// SPDX-License-Identifier: MIT OR Apache-2.0

//! WiFi STA association and the embassy network stack.
//!
//! Association failure is fatal to send capability, never to the process:
//! `if_up` waits a bounded time for link and DHCP, then hands the stack
//! back either way while the connection task keeps retrying behind it.

use embassy_executor::Spawner;
use embassy_net::{Runner, Stack, StackResources};
use embassy_time::{with_timeout, Duration, Timer};
use esp_hal::peripherals::WIFI;
use esp_hal::rng::Rng;
use esp_wifi::wifi::{
    AuthMethod, ClientConfiguration, Configuration, WifiController, WifiDevice, WifiEvent,
    WifiState,
};
use esp_wifi::EspWifiController;
use log::{info, warn};

use crate::config::ReporterConfig;
use crate::settings;

macro_rules! mk_static {
    ($t:ty,$val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write(($val));
        x
    }};
}

/// Brings the interface up in STA mode with DHCPv4 and returns the stack.
///
/// Returns after link + address are up, or after the bounded wait expires
/// with a warning; callers proceed either way and individual sends fail
/// fast until the connection task gets the association back.
pub async fn if_up(
    spawner: Spawner,
    wifi_controller: EspWifiController<'static>,
    wifi: WIFI<'static>,
    rng: &mut Rng,
    config: &'static ReporterConfig,
) -> Stack<'static> {
    let wifi_init = &*mk_static!(EspWifiController<'static>, wifi_controller);
    let (controller, interfaces) = esp_wifi::wifi::new(wifi_init, wifi).unwrap();

    let net_config = embassy_net::Config::dhcpv4(Default::default());
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    // Init network stack
    let (stack, runner) = embassy_net::new(
        interfaces.sta,
        net_config,
        mk_static!(StackResources<4>, StackResources::<4>::new()),
        seed,
    );

    spawner.spawn(connection(controller, config)).ok();
    spawner.spawn(net_up(runner)).ok();

    let up = with_timeout(Duration::from_millis(settings::WIFI_UP_TIMEOUT_MS), async {
        stack.wait_link_up().await;
        stack.wait_config_up().await;
    })
    .await;

    match up {
        Ok(()) => {
            if let Some(v4) = stack.config_v4() {
                info!("WiFi up, IPv4 address: {}", v4.address);
            }
        }
        Err(_) => warn!("WiFi/DHCP not up after bounded wait; polling continues regardless"),
    }

    stack
}

/// Keeps the STA association alive: joins the configured AP and rejoins
/// after every disconnect.
#[embassy_executor::task]
async fn connection(mut controller: WifiController<'static>, config: &'static ReporterConfig) {
    info!("WiFi device capabilities: {:?}", controller.capabilities());

    loop {
        if esp_wifi::wifi::wifi_state() == WifiState::StaConnected {
            // wait until we're no longer connected
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            warn!("WiFi disconnected");
            Timer::after(Duration::from_millis(5000)).await;
        }
        if !matches!(controller.is_started(), Ok(true)) {
            let client_config = Configuration::Client(ClientConfiguration {
                ssid: config.wifi_ssid.as_str().into(),
                password: config
                    .wifi_pw
                    .as_ref()
                    .map(|p| p.as_str())
                    .unwrap_or("")
                    .into(),
                auth_method: if config.wifi_pw.is_some() {
                    AuthMethod::WPA2Personal
                } else {
                    AuthMethod::None
                },
                ..Default::default()
            });
            controller.set_configuration(&client_config).unwrap();
            info!("starting WiFi");
            controller.start_async().await.unwrap();
        }

        info!("joining '{}'", config.wifi_ssid);
        match controller.connect_async().await {
            Ok(()) => info!("WiFi connected"),
            Err(e) => {
                warn!("WiFi join failed: {:?}", e);
                Timer::after(Duration::from_millis(5000)).await;
            }
        }
    }
}

#[embassy_executor::task]
async fn net_up(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}
