//! Bathy - Handheld Fishing Radar Firmware
//!
//! Main firmware binary for the RP2040 handheld. A companion sends sonar
//! detections over UART; the device draws them as a sweeping radar on a
//! 128x64 OLED, beeps faster and higher as targets close in, and reports
//! rod tilt, sticks and buttons back over the same link. Holding button 1
//! plays a steady tone.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use bathy_core::config::{parse_config, DeviceConfig};
use bathy_drivers::{Adxl345, PwmBuzzer, SerialLink, TelemetryWriter};
use bathy_hal::gpio::ActiveLow;

use crate::board::{Button, RpPwm, UartRx, UartTx};
use crate::ssd1306::Ssd1306;

mod board;
mod ssd1306;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

/// Bus speed of both I2C buses
const I2C_HZ: u32 = 400_000;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 512]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Bathy firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Display: I2C0, GP16 SDA / GP17 SCL
    let mut display_i2c_config = I2cConfig::default();
    display_i2c_config.frequency = I2C_HZ;
    let display_i2c = I2c::new_blocking(p.I2C0, p.PIN_17, p.PIN_16, display_i2c_config);
    let mut display = Ssd1306::new(display_i2c);
    if display.init().is_err() {
        // Keep running; the radar still beeps without a panel
        warn!("Display init failed");
    } else {
        info!("Display initialized");
    }

    // Accelerometer: I2C1, GP18 SDA / GP19 SCL
    let mut accel_i2c_config = I2cConfig::default();
    accel_i2c_config.frequency = I2C_HZ;
    let accel_i2c = I2c::new_blocking(p.I2C1, p.PIN_19, p.PIN_18, accel_i2c_config);
    let mut accel = Adxl345::new(accel_i2c);
    let accel = match accel.init() {
        Ok(()) => {
            info!("ADXL345 initialized");
            Some(accel)
        }
        Err(e) => {
            warn!("ADXL345 init failed: {:?}, tilt reports 0", e);
            None
        }
    };

    // Sticks: ADC0 / ADC1 on GP26 / GP27, die temperature on ADC4
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let stick_x = Channel::new_pin(p.PIN_26, Pull::None);
    let stick_y = Channel::new_pin(p.PIN_27, Pull::None);
    let temp_sensor = Channel::new_temp_sensor(p.ADC_TEMP_SENSOR);

    // Buttons: GP21 / GP20, pulled up, pressed = low
    let button1 = ActiveLow::new(Button::new(Input::new(p.PIN_21, Pull::Up)));
    let button2 = ActiveLow::new(Button::new(Input::new(p.PIN_20, Pull::Up)));

    // Buzzer: GP15 is PWM slice 7, channel B
    let pwm = Pwm::new_output_b(p.PWM_SLICE7, p.PIN_15, PwmConfig::default());
    let buzzer = PwmBuzzer::new(RpPwm::new(pwm));
    info!("Inputs and buzzer initialized");

    // Companion link: UART0, GP0 TX / GP1 RX
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.link.baud_rate;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 512]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config.link.baud_rate);

    let board = tasks::Board {
        accel,
        adc,
        stick_x,
        stick_y,
        temp_sensor,
        button1,
        button2,
        buzzer,
        link: SerialLink::new(UartRx::new(rx)),
        telemetry: TelemetryWriter::new(UartTx::new(tx), config.link.telemetry_period_ms),
    };

    spawner.spawn(unwrap!(tasks::control_task(board, display, config)));

    info!("Control task spawned, firmware running");
}

/// Parse and validate the embedded configuration
///
/// Falls back to built-in defaults so a bad file never bricks the device.
fn load_config() -> DeviceConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("device.toml parse error: {:?}, using defaults", e);
            return DeviceConfig::default();
        }
    };

    match config.validate() {
        Ok(()) => {
            info!(
                "Configuration loaded: sweep {} ms, cycle {} ms",
                config.radar.sweep_period_ms, config.control.cycle_ms
            );
            config
        }
        Err(e) => {
            error!("device.toml invalid: {:?}, using defaults", e);
            DeviceConfig::default()
        }
    }
}
