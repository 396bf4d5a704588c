#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use esp_hal::analog::adc::{Adc, AdcConfig, Attenuation};
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::uart::{Config as UartConfig, Uart};
use log::{error, info};

use probe_core::Sampler;
use probe_firmware::analog_pin::AnalogPin;
use probe_firmware::settings::probe_config;

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

extern crate alloc;

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    rtt_target::rtt_init_log!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // probe-core links `alloc`, which needs a global allocator.
    esp_alloc::heap_allocator!(size: 8 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let probe_config = probe_config();

    // Sensor input on GPIO1 (ADC1 channel 0)
    let mut adc1_config = AdcConfig::new();
    let pin = adc1_config.enable_pin(peripherals.GPIO1, Attenuation::_11dB);
    let adc1 = Adc::new(peripherals.ADC1, adc1_config);
    let input = AnalogPin::new(adc1, pin);

    // UART0 is routed to the USB-serial bridge on most dev boards
    let uart = Uart::new(
        peripherals.UART0,
        UartConfig::default().with_baudrate(probe_config.baud_rate),
    )
    .expect("Failed to initialize UART0")
    .with_tx(peripherals.GPIO43)
    .with_rx(peripherals.GPIO44)
    .into_async();

    info!("Peripherals initialized!");

    let mut sampler = Sampler::new(input, uart, probe_config);
    let mut delay = embassy_time::Delay;

    loop {
        // Only serial failures end a run; keep retrying so a reconnected
        // terminal picks the stream back up.
        if let Err(e) = sampler.run(&mut delay, None).await {
            error!("Sampling interrupted: {}", e);
            embassy_time::Timer::after_secs(1).await;
        }
    }
}
