//! Button, stick and die temperature input

/// ADC reference voltage
const ADC_VREF: f32 = 3.3;
/// Sensor voltage at 27 °C
const TEMP_SENSOR_V27: f32 = 0.706;
/// Sensor slope in volts per °C (falls as the die warms)
const TEMP_SENSOR_SLOPE: f32 = 0.001721;

/// Readouts shown beside the radar
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelStatus {
    /// Button 2 presses since boot
    pub press_count: u32,
    /// Die temperature, `None` until the first reading
    pub temperature_c: Option<f32>,
}

/// Edge-detecting latch for a push button
///
/// Electrical debouncing is left to the hardware; the latch only turns a
/// sampled level into press edges.
#[derive(Debug, Clone, Default)]
pub struct ButtonLatch {
    held: bool,
    presses: u32,
}

impl ButtonLatch {
    pub const fn new() -> Self {
        Self {
            held: false,
            presses: 0,
        }
    }

    /// Feed the sampled level; returns true on a press edge
    pub fn update(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.held;
        if edge {
            self.presses = self.presses.wrapping_add(1);
        }
        self.held = pressed;
        edge
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Press edges seen since creation
    pub fn press_count(&self) -> u32 {
        self.presses
    }
}

/// Scale a 12-bit ADC sample to the full 16-bit range
///
/// The top bits are replicated into the low nibble so 0xFFF maps to 0xFFFF.
pub fn scale_adc_12_to_16(raw: u16) -> u16 {
    let raw = raw & 0x0FFF;
    (raw << 4) | (raw >> 8)
}

/// Die temperature in °C from a 12-bit sample of the internal sensor
pub fn die_temperature_c(raw: u16) -> f32 {
    let volts = f32::from(raw & 0x0FFF) * ADC_VREF / 4095.0;
    27.0 - (volts - TEMP_SENSOR_V27) / TEMP_SENSOR_SLOPE
}
