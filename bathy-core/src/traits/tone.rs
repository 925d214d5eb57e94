//! Tone generator trait

/// Trait for a buzzer or speaker that plays a single tone
///
/// Both calls are idempotent: starting at the frequency already playing
/// or stopping a silent output has no further effect.
pub trait ToneOutput {
    /// Start (or retune) the tone
    fn start(&mut self, frequency_hz: u32);

    /// Silence the output
    fn stop(&mut self);

    /// Check if a tone is currently playing
    fn is_sounding(&self) -> bool;
}
