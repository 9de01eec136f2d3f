#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::timer::timg::TimerGroup;
use log::{error, info, warn};
use static_cell::StaticCell;

use panel_core::notifications::sample_notifications;
use panel_core::ui::{PanelUi, UiState};
use panel_core::{EntrySequencer, PanelActions, RenderLock};
use panel_firmware::backlight::PmicBacklight;
use panel_firmware::config::panel_config;
use panel_firmware::display::CoreS3Panel;
use panel_firmware::hardware::{create_i2c_bus, init_i2c_hardware};
use panel_firmware::tasks::{SharedUi, touch_task, ui_task};
use panel_firmware::touch::Ft6336u;

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    error!("PANIC: {}", info);
    loop {}
}

extern crate alloc;

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_log!(log::LevelFilter::Info);

    let hal_config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(hal_config);

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 73744);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Embassy initialized");

    let config = panel_config();
    info!(
        "Tick {} ms, touch poll {} ms, input lock {:?}",
        config.tick_interval_ms, config.touch_poll_ms, config.input_lock_timeout
    );

    // I2C: PMIC, IO expander, touch controller
    let i2c = create_i2c_bus(peripherals.I2C0, peripherals.GPIO12, peripherals.GPIO11)
        .expect("default I2C config is valid");
    let (hardware, touch_i2c) = init_i2c_hardware(i2c).await;
    let mut backlight = PmicBacklight::new(hardware.power_mgmt);

    // SPI: LCD. CS is driven as a plain GPIO.
    let spi_bus = Spi::new(peripherals.SPI2, SpiConfig::default())
        .expect("default SPI config is valid")
        .with_sck(peripherals.GPIO36)
        .with_mosi(peripherals.GPIO37);
    let cs = Output::new(peripherals.GPIO35, Level::High, OutputConfig::default());
    let Ok(spi_device) = ExclusiveDevice::new_no_delay(spi_bus, cs);
    let dc = Output::new(peripherals.GPIO34, Level::Low, OutputConfig::default());

    let touch = Ft6336u::new(touch_i2c, config.display.width, config.display.height);
    let mut panel = CoreS3Panel::new(spi_device, dc, touch, config.display);

    let ui = match PanelUi::new(
        PanelActions,
        UiState::new(sample_notifications()),
        config.display.bounds(),
    ) {
        Ok(ui) => ui,
        Err(e) => panic!("UI description rejected: {}", e),
    };
    static RENDER_LOCK: StaticCell<SharedUi> = StaticCell::new();
    let lock: &'static SharedUi = RENDER_LOCK.init(RenderLock::new(ui));

    let mut sequencer = EntrySequencer::new();
    match sequencer.run(&mut panel, &mut backlight, lock).await {
        Ok(report) if report.all_ok() => info!("Startup complete"),
        Ok(report) => warn!("Startup degraded: {:?}", report),
        Err(e) => error!("Entry sequence failed: {}", e),
    }

    let (display, touch) = panel.into_parts();
    match ui_task(lock, display, config.tick_interval_ms) {
        Ok(token) => spawner.spawn(token),
        Err(e) => error!("Failed to spawn UI task: {:?}", e),
    }
    match touch_task(lock, touch, config) {
        Ok(token) => spawner.spawn(token),
        Err(e) => error!("Failed to spawn touch task: {:?}", e),
    }

    loop {
        Timer::after(Duration::from_secs(60)).await;
        if let Ok(ui) = lock.try_lock() {
            info!(
                "Alive: {} ticks, {} touch events dropped, backlight {}",
                ui.ticks(),
                ui.dropped_events(),
                if backlight.is_on() { "on" } else { "off" }
            );
        }
    }
}
