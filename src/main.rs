#![no_std]
#![no_main]

use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{
    delay::Delay,
    gpio::{Level, Output, OutputConfig},
    i2c::master::{Config as I2cConfig, I2c},
    rng::Rng,
    spi::master::{Config as SpiConfig, Spi},
    spi::Mode,
    time::Rate,
    timer::timg::TimerGroup,
};

use embassy_executor::Spawner;
use embedded_hal_bus::spi::ExclusiveDevice;
use log::info;
use mfrc522::comm::blocking::spi::SpiInterface;
use mfrc522::Mfrc522;
use static_cell::StaticCell;
use tap_stamp::{
    buzzer::Buzzer,
    config::ReporterConfig,
    display::{self, StatusPanel},
    espressif::net::if_up,
    reporter,
};

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) -> ! {
    esp_alloc::heap_allocator!(size: 72 * 1024);
    esp_println::logger::init_logger_from_env();

    // System init
    let peripherals = esp_hal::init(esp_hal::Config::default());
    let mut rng = Rng::new(peripherals.RNG);
    let timg0 = TimerGroup::new(peripherals.TIMG0);

    cfg_if::cfg_if! {
       if #[cfg(feature = "esp32")] {
            let timg1 = TimerGroup::new(peripherals.TIMG1);
            esp_hal_embassy::init(timg1.timer0);
       } else {
           use esp_hal::timer::systimer::SystemTimer;
           let systimer = SystemTimer::new(peripherals.SYSTIMER);
           esp_hal_embassy::init(systimer.alarm0);
       }
    }

    static CONFIG: StaticCell<ReporterConfig> = StaticCell::new();
    let config = CONFIG.init(ReporterConfig::from_env().unwrap());
    info!("reporting to {} (param {})", config.report_url, config.uid_param);

    // Wiring per target board
    cfg_if::cfg_if! {
        if #[cfg(feature = "esp32")] {
            let sda = peripherals.GPIO21;
            let scl = peripherals.GPIO22;
            let sck = peripherals.GPIO18;
            let mosi = peripherals.GPIO23;
            let miso = peripherals.GPIO19;
            let cs = peripherals.GPIO5;
            let buzzer_pin = peripherals.GPIO4;
        } else if #[cfg(feature = "esp32s3")] {
            let sda = peripherals.GPIO8;
            let scl = peripherals.GPIO9;
            let sck = peripherals.GPIO12;
            let mosi = peripherals.GPIO11;
            let miso = peripherals.GPIO13;
            let cs = peripherals.GPIO10;
            let buzzer_pin = peripherals.GPIO14;
        } else {
            let sda = peripherals.GPIO1;
            let scl = peripherals.GPIO2;
            let sck = peripherals.GPIO4;
            let mosi = peripherals.GPIO6;
            let miso = peripherals.GPIO5;
            let cs = peripherals.GPIO7;
            let buzzer_pin = peripherals.GPIO3;
        }
    }

    // LCD first so the boot banner is up while WiFi associates
    let mut i2c = I2c::new(peripherals.I2C0, I2cConfig::default())
        .unwrap()
        .with_sda(sda)
        .with_scl(scl);
    let mut lcd_delay = Delay::new();
    let mut sender = display::sender(&mut i2c);
    let mut panel = StatusPanel::new(&mut sender, &mut lcd_delay);
    panel.booting();

    let wifi_controller = esp_wifi::init(timg0.timer0, rng, peripherals.RADIO_CLK).unwrap();
    let stack = if_up(spawner, wifi_controller, peripherals.WIFI, &mut rng, config).await;
    if stack.config_v4().is_some() {
        panel.wifi_up();
    } else {
        panel.wifi_down();
    }

    let spi = Spi::new(
        peripherals.SPI2,
        SpiConfig::default()
            .with_frequency(Rate::from_mhz(4))
            .with_mode(Mode::_0),
    )
    .unwrap()
    .with_sck(sck)
    .with_mosi(mosi)
    .with_miso(miso);
    let cs = Output::new(cs, Level::High, OutputConfig::default());
    let spi_device = ExclusiveDevice::new(spi, cs, Delay::new()).unwrap();
    let rc522 = Mfrc522::new(SpiInterface::new(spi_device)).init().unwrap();

    let buzzer = Buzzer::new(Output::new(buzzer_pin, Level::Low, OutputConfig::default()));

    reporter::run(stack, rng, config, rc522, panel, buzzer).await
}
