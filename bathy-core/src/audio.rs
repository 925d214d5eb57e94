//! Audio cadence controller
//!
//! Two-state timer (silent, sounding) evaluated once per cycle. Closer
//! targets beep more often and higher ranks beep at a higher pitch.
//! Nothing here ever sleeps; the tone is switched purely from elapsed
//! time.
//!
//! Holding button 1 overrides the cadence with a steady tone.

use crate::config::AudioConfig;
use crate::radar::TargetRank;
use crate::traits::ToneOutput;

/// Beep state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BeepState {
    #[default]
    Silent,
    Sounding,
    /// Steady manual tone
    Held,
}

/// What the controller did to the tone output this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BeepAction {
    /// No transition
    None,
    /// Tone started at the given frequency
    Start(u32),
    /// Tone stopped
    Stop,
}

/// Time between beep starts for a target at `distance_sq`
///
/// `clamp(base + distance_sq / 2, min, max)`; never decreases as the
/// distance grows.
pub fn beep_interval_ms(distance_sq: u32, config: &AudioConfig) -> u32 {
    config
        .base_interval_ms
        .saturating_add(distance_sq / 2)
        .clamp(config.min_interval_ms, config.max_interval_ms)
}

/// Tone frequency for `rank`
pub fn beep_frequency_hz(rank: u8, config: &AudioConfig) -> u32 {
    config
        .base_frequency_hz
        .saturating_add(u32::from(rank).saturating_mul(config.frequency_step_hz))
}

/// Non-blocking beep timer
#[derive(Debug, Clone)]
pub struct BeepController {
    config: AudioConfig,
    state: BeepState,
    last_start: u32,
    manual: bool,
}

impl BeepController {
    pub fn new(config: AudioConfig) -> Self {
        Self {
            config,
            state: BeepState::Silent,
            last_start: 0,
            manual: false,
        }
    }

    pub fn state(&self) -> BeepState {
        self.state
    }

    /// Request the steady manual tone; applied on the next update
    pub fn set_manual(&mut self, held: bool) {
        self.manual = held;
    }

    /// Evaluate the timers and switch the tone
    pub fn update<T: ToneOutput>(
        &mut self,
        now_ms: u32,
        rank: &TargetRank,
        tone: &mut T,
    ) -> BeepAction {
        if self.manual {
            if self.state == BeepState::Held {
                return BeepAction::None;
            }
            let frequency = self.config.manual_frequency_hz;
            tone.start(frequency);
            self.state = BeepState::Held;
            return BeepAction::Start(frequency);
        }

        if self.state == BeepState::Held {
            // Cadence resumes one interval after release
            tone.stop();
            self.state = BeepState::Silent;
            self.last_start = now_ms;
            return BeepAction::Stop;
        }

        if !rank.is_ranked() {
            tone.stop();
            return match core::mem::take(&mut self.state) {
                BeepState::Silent => BeepAction::None,
                BeepState::Sounding | BeepState::Held => BeepAction::Stop,
            };
        }

        let elapsed = now_ms.wrapping_sub(self.last_start);

        if elapsed > beep_interval_ms(rank.nearest_distance_sq, &self.config) {
            let frequency = beep_frequency_hz(rank.nearest_rank, &self.config);
            tone.start(frequency);
            self.last_start = now_ms;
            self.state = BeepState::Sounding;
            return BeepAction::Start(frequency);
        }

        if self.state == BeepState::Sounding && elapsed > self.config.pulse_ms {
            tone.stop();
            self.state = BeepState::Silent;
            return BeepAction::Stop;
        }

        BeepAction::None
    }
}
