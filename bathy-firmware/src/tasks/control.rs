//! Control task
//!
//! The single cooperative loop of the device. Every tick:
//! - sample the buttons (button 1 holds the manual tone)
//! - run one control cycle (link, sweep, ranking, tone)
//! - draw and flush the radar frame
//! - sample tilt, sticks and temperature and send telemetry when due

use defmt::*;
use embassy_rp::adc::{Adc, Blocking as AdcBlocking, Channel};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::{I2C0, I2C1};
use embassy_time::{Duration, Ticker};

use bathy_core::config::DeviceConfig;
use bathy_core::cycle::{ControlCycle, CycleReport, LinkOutcome};
use bathy_core::input::{die_temperature_c, scale_adc_12_to_16, ButtonLatch, PanelStatus};
use bathy_core::tilt::Tilt;
use bathy_display::{render_frame, GraphicsSurface};
use bathy_drivers::{Adxl345, LinkStats, PwmBuzzer, SerialLink, TelemetryWriter};
use bathy_hal::gpio::ActiveLow;
use bathy_protocol::TelemetryFrame;

use crate::board::{Button, EmbassyClock, RpPwm, UartRx, UartTx};
use crate::ssd1306::Ssd1306;

/// Stick reading reported when the ADC fails (centered)
const STICK_CENTER: u16 = 32768;

/// SSD1306 panel on I2C0
pub type Display = Ssd1306<I2c<'static, I2C0, Blocking>>;

/// Input and output peripherals owned by the control task
pub struct Board {
    /// `None` when the accelerometer did not answer at boot
    pub accel: Option<Adxl345<I2c<'static, I2C1, Blocking>>>,
    pub adc: Adc<'static, AdcBlocking>,
    pub stick_x: Channel<'static>,
    pub stick_y: Channel<'static>,
    /// Internal die temperature sensor (ADC4)
    pub temp_sensor: Channel<'static>,
    pub button1: ActiveLow<Button>,
    pub button2: ActiveLow<Button>,
    pub buzzer: PwmBuzzer<RpPwm>,
    pub link: SerialLink<UartRx>,
    pub telemetry: TelemetryWriter<UartTx>,
}

/// Host-facing input state carried between cycles
struct Inputs {
    tilt: Tilt,
    stick_x: u16,
    stick_y: u16,
    temperature_c: Option<f32>,
    button1: ButtonLatch,
    button2: ButtonLatch,
}

#[embassy_executor::task]
pub async fn control_task(mut board: Board, display: Display, config: DeviceConfig) {
    info!("Control task started (cycle {} ms)", config.control.cycle_ms);

    let clock = EmbassyClock::new();
    let mut cycle = ControlCycle::new(config);
    let mut surface = GraphicsSurface::new(display);
    let mut inputs = Inputs {
        tilt: Tilt::default(),
        stick_x: STICK_CENTER,
        stick_y: STICK_CENTER,
        temperature_c: None,
        button1: ButtonLatch::new(),
        button2: ButtonLatch::new(),
    };
    let mut was_stale = false;
    let mut link_stats = LinkStats::default();

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(config.control.cycle_ms)));

    loop {
        ticker.next().await;

        sample_buttons(&board, &mut inputs);
        cycle.set_manual_tone(inputs.button1.is_held());

        let report = cycle.run(&clock, &mut board.link, &mut board.buzzer);
        log_report(&report);

        let stats = board.link.stats();
        log_link_drops(&stats.since(&link_stats));
        link_stats = stats;

        if report.link_stale != was_stale {
            if report.link_stale {
                warn!("Companion link stale");
            } else {
                info!("Companion link restored");
            }
            was_stale = report.link_stale;
        }

        // Also paces the slow sensors when telemetry is off
        if board.telemetry.is_due(report.now_ms) {
            sample_sensors(&mut board, &mut inputs);
            if config.link.telemetry_enabled {
                let frame = telemetry_frame(&inputs);
                if let Err(e) = board.telemetry.send_if_due(report.now_ms, &frame) {
                    warn!("Telemetry send failed: {:?}", e);
                }
            }
        }

        cycle.set_status(PanelStatus {
            press_count: inputs.button2.press_count(),
            temperature_c: inputs.temperature_c,
        });

        if let Err(e) = render_frame(&mut surface, &cycle.frame()) {
            warn!("Render failed: {:?}", e);
        }
        if surface.target_mut().flush().is_err() {
            warn!("Display flush failed");
        }
    }
}

fn log_report(report: &CycleReport) {
    match report.link {
        LinkOutcome::Idle => {}
        LinkOutcome::Applied {
            detections,
            skipped,
        } => {
            debug!(
                "Update applied: {} detections, {} skipped",
                detections, skipped
            );
        }
        LinkOutcome::Rejected(e) => {
            warn!("Line rejected: {:?}", e);
        }
    }

    if report.evicted > 0 {
        warn!("Afterglow full, {} detections evicted", report.evicted);
    }

    trace!(
        "t={} rank={} beep={:?}",
        report.now_ms,
        report.rank.nearest_rank,
        report.beep
    );
}

/// Report lines the assembler dropped since the last cycle
fn log_link_drops(added: &LinkStats) {
    if added.is_empty() {
        return;
    }
    if added.overlong > 0 {
        warn!("Dropped {} overlong lines", added.overlong);
    }
    if added.invalid_utf8 > 0 {
        warn!("Dropped {} non-UTF-8 lines", added.invalid_utf8);
    }
    if added.rx_errors > 0 {
        warn!("{} UART receive errors", added.rx_errors);
    }
}

fn sample_buttons(board: &Board, inputs: &mut Inputs) {
    if inputs.button1.update(board.button1.is_pressed()) {
        debug!("Button 1 pressed ({})", inputs.button1.press_count());
    }
    if inputs.button2.update(board.button2.is_pressed()) {
        debug!("Button 2 pressed ({})", inputs.button2.press_count());
    }
}

/// Read tilt, sticks and die temperature
fn sample_sensors(board: &mut Board, inputs: &mut Inputs) {
    if let Some(accel) = board.accel.as_mut() {
        // Keep the last good reading on a bus error
        match accel.read_tilt() {
            Ok(tilt) => inputs.tilt = tilt,
            Err(e) => warn!("Accelerometer read failed: {:?}", e),
        }
    }

    inputs.stick_x = read_stick(&mut board.adc, &mut board.stick_x);
    inputs.stick_y = read_stick(&mut board.adc, &mut board.stick_y);

    match board.adc.blocking_read(&mut board.temp_sensor) {
        Ok(raw) => inputs.temperature_c = Some(die_temperature_c(raw)),
        Err(_) => trace!("Temperature ADC read failed"),
    }
}

fn telemetry_frame(inputs: &Inputs) -> TelemetryFrame {
    TelemetryFrame {
        roll_deg: inputs.tilt.roll_deg,
        pitch_deg: inputs.tilt.pitch_deg,
        stick_x: inputs.stick_x,
        stick_y: inputs.stick_y,
        button1: inputs.button1.is_held(),
        button2: inputs.button2.is_held(),
    }
}

fn read_stick(adc: &mut Adc<'static, AdcBlocking>, channel: &mut Channel<'static>) -> u16 {
    match adc.blocking_read(channel) {
        Ok(raw) => scale_adc_12_to_16(raw),
        Err(_) => {
            trace!("Stick ADC read failed");
            STICK_CENTER
        }
    }
}
