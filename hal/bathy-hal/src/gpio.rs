//! GPIO pin abstractions
//!
//! The handheld only reads digital pins (two push buttons), so only the
//! input side is modelled here.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Input pin with an active-low button wired to it
///
/// Buttons on the handheld pull the pin to ground when pressed.
pub struct ActiveLow<P> {
    pin: P,
}

impl<P: InputPin> ActiveLow<P> {
    /// Wrap a pin whose pressed state reads low
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Check if the button is currently pressed
    pub fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPin(bool);

    impl InputPin for FixedPin {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_active_low_pressed() {
        let button = ActiveLow::new(FixedPin(false));
        assert!(button.is_pressed());
    }

    #[test]
    fn test_active_low_released() {
        let button = ActiveLow::new(FixedPin(true));
        assert!(!button.is_pressed());
    }
}
