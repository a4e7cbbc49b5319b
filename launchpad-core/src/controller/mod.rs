//! Launch controller state machine
//!
//! One [`LaunchController::tick`] per loop pass runs, in order: the global
//! fault check, the handler of the active state (at most one transition),
//! and the tone player. Nothing blocks; every wait is a comparison against
//! a captured timestamp or an absolute deadline.
//!
//! All outputs go through [`LaunchController::enter`] or the per-state
//! display refresh, so the controller is the only writer of the board.

use core::fmt::Write;

use heapless::String;

use crate::config::{LaunchTiming, LauncherConfig, LcdLine, LCD_COLUMNS};
use crate::log::{debug, info, warning};
use crate::safety::{FaultMonitor, NoFaultMonitor};
use crate::selfcheck::{SelfCheck, SelfCheckStep, SELF_CHECK_COUNT};
use crate::state::{entry, EntryText, EntryTone, FaultCause, LaunchState, LockChange, OutputLevels};
use crate::time::{deadline_after, deadline_reached, elapsed, remaining_secs, Millis};
use crate::tone::{sounds, TonePlayer};
use crate::traits::{Board, BoardExt, ControlInputs};

#[cfg(test)]
mod tests;

/// Launch sequence controller
///
/// Owns the board for its whole lifetime. Inputs are borrowed per tick so
/// the host decides when they are sampled.
#[derive(Debug)]
pub struct LaunchController<B: Board, F: FaultMonitor = NoFaultMonitor> {
    board: B,
    faults: F,
    timing: LaunchTiming,
    splash_title: LcdLine,
    splash_subtitle: LcdLine,
    /// Active state
    state: LaunchState,
    /// Operator inputs are ignored
    system_locked: bool,
    /// When the active state was entered
    entered_at: Millis,
    /// Auto-exit time of a time-boxed state
    deadline: Option<Millis>,
    /// Start of the current launch press in ARMED
    launch_held_since: Option<Millis>,
    /// Start of the current reset press in FAULT
    reset_held_since: Option<Millis>,
    self_check: SelfCheck,
    /// Last periodic redraw of line 2
    last_refresh: Option<Millis>,
    /// Why FAULT was last entered
    fault_cause: Option<FaultCause>,
    /// Levels last written to the board
    outputs: OutputLevels,
    tone: TonePlayer,
}

impl<B: Board> LaunchController<B> {
    /// Create a controller for a board without fault sensing
    pub fn new(board: B, config: &LauncherConfig) -> Self {
        Self::with_fault_monitor(board, config, NoFaultMonitor)
    }
}

impl<B: Board, F: FaultMonitor> LaunchController<B, F> {
    /// Create a controller consulting `faults` every tick
    ///
    /// The controller starts in STARTUP with inputs locked. Call
    /// [`begin`](Self::begin) once the board is up to drive the outputs
    /// safe and show the splash screen.
    pub fn with_fault_monitor(board: B, config: &LauncherConfig, faults: F) -> Self {
        let entered_at = board.millis();
        Self {
            board,
            faults,
            timing: config.timing,
            splash_title: config.splash_title.clone(),
            splash_subtitle: config.splash_subtitle.clone(),
            state: LaunchState::Startup,
            system_locked: true,
            entered_at,
            deadline: None,
            launch_held_since: None,
            reset_held_since: None,
            self_check: SelfCheck::new(),
            last_refresh: None,
            fault_cause: None,
            outputs: OutputLevels::ALL_OFF,
            tone: TonePlayer::new(),
        }
    }

    /// Safe boot: de-energize everything, then show the splash screen
    pub fn begin(&mut self) {
        self.board.set_outputs(OutputLevels::ALL_OFF);
        self.outputs = OutputLevels::ALL_OFF;
        info!("outputs forced safe");

        let now = self.board.millis();
        self.transition(LaunchState::Splash, now);
    }

    /// Enter `state` now, applying its full entry configuration
    ///
    /// Entering FAULT this way records [`FaultCause::Commanded`].
    pub fn enter(&mut self, state: LaunchState) {
        let now = self.board.millis();
        if state.is_fault() {
            self.fault(FaultCause::Commanded, now);
        } else {
            self.transition(state, now);
        }
    }

    /// Run one controller pass at `now`
    pub fn tick<I: ControlInputs>(&mut self, now: Millis, inputs: &I) {
        if !self.state.is_fault() && self.faults.fault_active() {
            self.fault(FaultCause::GlobalFault, now);
        } else {
            match self.state {
                LaunchState::Startup => self.update_startup(now, inputs),
                LaunchState::Splash => self.update_splash(now),
                LaunchState::Ready => self.update_ready(now, inputs),
                LaunchState::Armed => self.update_armed(now, inputs),
                LaunchState::LaunchCountdown => self.update_countdown(now, inputs),
                LaunchState::Launching => self.update_launching(now),
                LaunchState::Cooldown => self.update_cooldown(now),
                LaunchState::Abort => self.update_abort(now, inputs),
                LaunchState::Fault => self.update_fault(now, inputs),
            }
        }

        self.tone.update(now, &mut self.board);
    }

    // ---- state handlers ----

    fn update_startup<I: ControlInputs>(&mut self, now: Millis, inputs: &I) {
        if inputs.any_active() {
            self.fault(FaultCause::StartupInputActive, now);
            return;
        }

        let interval = self.timing.self_check_interval_ms(SELF_CHECK_COUNT);
        match self.self_check.poll(now, interval) {
            Some(SelfCheckStep::Item { number, label }) => {
                debug!("self-check {}/{}", number, SELF_CHECK_COUNT);
                self.board.lcd_clear();
                self.board.lcd_set_cursor(0, 0);
                self.board.lcd_print("Check ");
                self.board.lcd_print_number(number as u32);
                self.board.lcd_print("/");
                self.board.lcd_print_number(SELF_CHECK_COUNT as u32);
                self.board.lcd_set_cursor(0, 1);
                self.board.lcd_print(label);
                self.tone.play(&sounds::CHECK, false, &mut self.board);
            }
            Some(SelfCheckStep::Complete) => {
                self.board.show_lines("Self-check", "COMPLETE!");
            }
            None => {}
        }

        if self.self_check.hold_elapsed(now, self.timing.self_check_hold_ms) {
            self.transition(LaunchState::Ready, now);
        }
    }

    fn update_splash(&mut self, now: Millis) {
        if self.deadline_passed(now) {
            self.transition(LaunchState::Startup, now);
        }
    }

    fn update_ready<I: ControlInputs>(&mut self, now: Millis, inputs: &I) {
        if !self.system_locked && inputs.is_armed() {
            self.transition(LaunchState::Armed, now);
        }
    }

    fn update_armed<I: ControlInputs>(&mut self, now: Millis, inputs: &I) {
        if self.system_locked {
            self.launch_held_since = None;
            return;
        }

        if !inputs.is_armed() {
            self.transition(LaunchState::Ready, now);
            return;
        }

        if inputs.is_launch_held() {
            let since = *self.launch_held_since.get_or_insert(now);
            if elapsed(now, since) >= self.timing.launch_confirm_ms {
                self.transition(LaunchState::LaunchCountdown, now);
            }
        } else {
            self.launch_held_since = None;
        }
    }

    fn update_countdown<I: ControlInputs>(&mut self, now: Millis, inputs: &I) {
        if !self.system_locked {
            if !inputs.is_armed() {
                self.fault(FaultCause::InterlockBroken, now);
                return;
            }
            if !inputs.is_launch_held() {
                self.transition(LaunchState::Abort, now);
                return;
            }
        }

        if self.refresh_due(now) {
            let secs = remaining_secs(self.timing.hold_to_launch_ms, elapsed(now, self.entered_at));
            self.print_countdown(1, "Hold ", secs);
        }

        if self.deadline_passed(now) {
            self.transition(LaunchState::Launching, now);
        }
    }

    fn update_launching(&mut self, now: Millis) {
        if self.deadline_passed(now) {
            // Relay and lamp drop before anything else happens
            self.board.set_outputs(OutputLevels::ALL_OFF);
            self.outputs = OutputLevels::ALL_OFF;
            self.transition(LaunchState::Cooldown, now);
        }
    }

    fn update_cooldown(&mut self, now: Millis) {
        if self.deadline_passed(now) {
            self.fault(FaultCause::PostLaunchLockout, now);
        }
    }

    fn update_abort<I: ControlInputs>(&mut self, now: Millis, inputs: &I) {
        if self.deadline_passed(now) {
            let next = if inputs.is_armed() {
                LaunchState::Armed
            } else {
                LaunchState::Ready
            };
            self.transition(next, now);
        }
    }

    fn update_fault<I: ControlInputs>(&mut self, now: Millis, inputs: &I) {
        if self.system_locked || inputs.is_armed() {
            self.reset_held_since = None;
            if self.refresh_due(now) {
                self.board.print_row(1, "Disarm & Reset");
            }
            return;
        }

        if !inputs.is_reset_held() {
            if self.reset_held_since.take().is_some() {
                self.board.print_row(1, "Disarm + Reset");
            }
            return;
        }

        let since = *self.reset_held_since.get_or_insert(now);
        let held = elapsed(now, since);

        if self.refresh_due(now) {
            let secs = remaining_secs(self.timing.reset_hold_ms, held);
            self.print_countdown(1, "Reset ", secs);
        }

        if held >= self.timing.reset_hold_ms && !self.faults.fault_active() {
            info!("fault cleared");
            self.transition(LaunchState::Ready, now);
        }
    }

    // ---- transitions ----

    fn fault(&mut self, cause: FaultCause, now: Millis) {
        warning!("fault: {}", cause);
        self.fault_cause = Some(cause);
        self.transition(LaunchState::Fault, now);
    }

    /// The single place the active state changes
    fn transition(&mut self, next: LaunchState, now: Millis) {
        info!("{} -> {}", self.state, next);

        self.state = next;
        self.entered_at = now;
        self.deadline = next
            .time_box_ms(&self.timing)
            .map(|ms| deadline_after(now, ms));
        self.launch_held_since = None;
        self.reset_held_since = None;
        self.last_refresh = None;
        if next == LaunchState::Startup {
            self.self_check.reset();
        }

        let entry = entry(next);
        let outputs = OutputLevels {
            relay: entry.outputs.relay && next.relay_allowed(),
            ..entry.outputs
        };

        self.board.set_outputs(outputs);
        self.outputs = outputs;

        match entry.text {
            EntryText::Fixed(line1, line2) => self.board.show_lines(line1, line2),
            EntryText::Splash => self
                .board
                .show_lines(&self.splash_title, &self.splash_subtitle),
        }

        match entry.tone {
            EntryTone::Play(sequence, looping) => {
                self.tone.play(sequence, looping, &mut self.board)
            }
            EntryTone::Stop => self.tone.stop(&mut self.board),
        }

        match entry.lock {
            LockChange::Lock => self.system_locked = true,
            LockChange::Unlock => self.system_locked = false,
            LockChange::Keep => {}
        }
    }

    // ---- helpers ----

    fn deadline_passed(&self, now: Millis) -> bool {
        self.deadline
            .is_some_and(|deadline| deadline_reached(now, deadline))
    }

    /// Rate limit for periodic redraws; claims the slot when due
    fn refresh_due(&mut self, now: Millis) -> bool {
        let due = self
            .last_refresh
            .map_or(true, |last| elapsed(now, last) >= self.timing.display_refresh_ms);
        if due {
            self.last_refresh = Some(now);
        }
        due
    }

    /// Draw "<prefix>Ns" on `row`
    fn print_countdown(&mut self, row: u8, prefix: &str, secs: u32) {
        let mut line: String<LCD_COLUMNS> = String::new();
        // Overflow truncates; real hold times are a few seconds
        let _ = write!(line, "{}{}s", prefix, secs);
        self.board.print_row(row, &line);
    }

    // ---- queries ----

    /// Active state
    pub fn state(&self) -> LaunchState {
        self.state
    }

    /// Check if operator inputs are being ignored
    pub fn is_system_locked(&self) -> bool {
        self.system_locked
    }

    /// Check if the controller is in ARMED
    pub fn is_armed(&self) -> bool {
        self.state == LaunchState::Armed
    }

    /// Check if the relay is firing
    pub fn is_launching(&self) -> bool {
        self.state == LaunchState::Launching
    }

    /// When the active state was entered
    pub fn entered_at(&self) -> Millis {
        self.entered_at
    }

    /// Auto-exit time of the active state, if time-boxed
    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    /// Start of the launch press being confirmed, if any
    pub fn launch_held_since(&self) -> Option<Millis> {
        self.launch_held_since
    }

    /// Start of the reset press clearing a fault, if any
    pub fn reset_held_since(&self) -> Option<Millis> {
        self.reset_held_since
    }

    /// Self-check progress
    pub fn self_check(&self) -> &SelfCheck {
        &self.self_check
    }

    /// Why FAULT was last entered
    pub fn fault_cause(&self) -> Option<FaultCause> {
        self.fault_cause
    }

    /// Output levels last written to the board
    pub fn outputs(&self) -> OutputLevels {
        self.outputs
    }

    /// Tone player state
    pub fn tone(&self) -> &TonePlayer {
        &self.tone
    }

    /// Active timing
    pub fn timing(&self) -> &LaunchTiming {
        &self.timing
    }

    /// Board access
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Mutable board access
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Mutable fault monitor access
    pub fn fault_monitor_mut(&mut self) -> &mut F {
        &mut self.faults
    }
}
