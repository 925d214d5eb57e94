//! Control cycle
//!
//! One call to [`ControlCycle::run`] is one pass of the control loop:
//!
//! 1. sample the clock (once; the value is reused for the whole pass)
//! 2. poll the line source and apply a decoded update as a whole
//! 3. advance the sweep and rebuild the afterglow set
//! 4. rank the raw detections
//! 5. switch the tone (the manual tone, when requested, wins)
//!
//! The tone decision only reads the rank, so the firmware draws after
//! `run` returns through [`ControlCycle::frame`], which computes the
//! navigation geometry from the same timestamp.

use bathy_protocol::{decode_line, Detection, Detections, LineError, NavigationState};

use crate::audio::{BeepAction, BeepController};
use crate::config::DeviceConfig;
use crate::geometry::Point;
use crate::input::PanelStatus;
use crate::link::LinkMonitor;
use crate::radar::{lock_mark, nav_indicator, rank_targets, NavIndicator, SweepTracker, TargetRank};
use crate::traits::{Clock, LineSource, ToneOutput};

/// Result of polling the link this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkOutcome {
    /// No line pending
    Idle,
    /// A line was decoded and applied
    Applied {
        /// Detections in the new raw set
        detections: u8,
        /// Entries dropped from the line
        skipped: u8,
    },
    /// A line was rejected; state unchanged
    Rejected(LineError),
}

/// Summary of one cycle for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    pub now_ms: u32,
    pub link: LinkOutcome,
    pub rank: TargetRank,
    pub beep: BeepAction,
    pub link_stale: bool,
    /// Afterglow entries evicted for capacity this cycle
    pub evicted: u32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct RadarFrame<'a> {
    pub config: &'a DeviceConfig,
    pub nav: &'a NavigationState,
    /// Outer end of the sweep line
    pub sweep_end: Point,
    /// Afterglow detections, unclipped
    pub detections: &'a [Detection],
    /// Lock mark on the rim, when it is in an "on" window
    pub lock_mark: Option<Point>,
    pub indicator: NavIndicator,
    pub link_stale: bool,
    pub status: PanelStatus,
}

/// Radar state owned by the control loop
#[derive(Debug, Clone)]
pub struct ControlCycle {
    config: DeviceConfig,
    nav: NavigationState,
    raw: Detections,
    sweep: SweepTracker,
    beeper: BeepController,
    link: LinkMonitor,
    rank: TargetRank,
    status: PanelStatus,
    now_ms: u32,
}

impl ControlCycle {
    pub fn new(config: DeviceConfig) -> Self {
        Self {
            config,
            nav: NavigationState::default(),
            raw: Detections::new(),
            sweep: SweepTracker::new(config.radar),
            beeper: BeepController::new(config.audio),
            link: LinkMonitor::new(config.link.timeout_ms),
            rank: TargetRank::NONE,
            status: PanelStatus::default(),
            now_ms: 0,
        }
    }

    /// Run one pass of the control loop
    pub fn run<C, L, T>(&mut self, clock: &C, lines: &mut L, tone: &mut T) -> CycleReport
    where
        C: Clock,
        L: LineSource,
        T: ToneOutput,
    {
        let now_ms = clock.now_ms();
        self.now_ms = now_ms;

        let link = self.poll_link(now_ms, lines);

        let evicted_before = self.sweep.afterglow().evicted();
        self.sweep.update(now_ms, &self.raw);
        let evicted = self.sweep.afterglow().evicted().wrapping_sub(evicted_before);

        self.rank = rank_targets(&self.raw);
        let beep = self.beeper.update(now_ms, &self.rank, tone);

        CycleReport {
            now_ms,
            link,
            rank: self.rank,
            beep,
            link_stale: self.link.is_stale(now_ms),
            evicted,
        }
    }

    /// Hold the steady manual tone from the next [`Self::run`] on
    pub fn set_manual_tone(&mut self, held: bool) {
        self.beeper.set_manual(held);
    }

    /// Replace the readouts drawn beside the radar
    pub fn set_status(&mut self, status: PanelStatus) {
        self.status = status;
    }

    fn poll_link<L: LineSource>(&mut self, now_ms: u32, lines: &mut L) -> LinkOutcome {
        let Some(line) = lines.poll_line() else {
            return LinkOutcome::Idle;
        };

        match decode_line(line, &self.nav) {
            Ok(update) => {
                let detections = update.detections.len() as u8;
                self.nav = update.nav;
                self.raw = update.detections;
                self.link.line_applied(now_ms);
                LinkOutcome::Applied {
                    detections,
                    skipped: update.skipped,
                }
            }
            Err(err) => {
                self.link.line_rejected();
                LinkOutcome::Rejected(err)
            }
        }
    }

    /// Frame geometry for the state after the last [`Self::run`]
    pub fn frame(&self) -> RadarFrame<'_> {
        RadarFrame {
            config: &self.config,
            nav: &self.nav,
            sweep_end: self.sweep.sweep_end(),
            detections: self.sweep.rendered(),
            lock_mark: lock_mark(
                self.now_ms,
                &self.nav,
                &self.rank,
                &self.config.radar,
                &self.config.lock,
            ),
            indicator: nav_indicator(&self.nav, &self.config.arrow),
            link_stale: self.link.is_stale(self.now_ms),
            status: self.status,
        }
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    /// Raw detections from the last applied line
    pub fn raw(&self) -> &[Detection] {
        &self.raw
    }

    pub fn rank(&self) -> TargetRank {
        self.rank
    }

    pub fn sweep(&self) -> &SweepTracker {
        &self.sweep
    }

    pub fn link(&self) -> &LinkMonitor {
        &self.link
    }
}
