use super::*;
use crate::safety::FaultFlag;
use crate::traits::mock::{MockBoard, MockInputs};

const IDLE: MockInputs = MockInputs {
    armed: false,
    reset: false,
    launch: false,
};

const ARMED_ONLY: MockInputs = MockInputs {
    armed: true,
    reset: false,
    launch: false,
};

const ARMED_LAUNCH: MockInputs = MockInputs {
    armed: true,
    reset: false,
    launch: true,
};

const RESET_ONLY: MockInputs = MockInputs {
    armed: false,
    reset: true,
    launch: false,
};

const ALL_STATES: [LaunchState; 9] = [
    LaunchState::Startup,
    LaunchState::Splash,
    LaunchState::Ready,
    LaunchState::Armed,
    LaunchState::LaunchCountdown,
    LaunchState::Launching,
    LaunchState::Cooldown,
    LaunchState::Abort,
    LaunchState::Fault,
];

fn controller() -> LaunchController<MockBoard> {
    LaunchController::new(MockBoard::new(), &LauncherConfig::default())
}

fn tick_at<F: FaultMonitor>(
    c: &mut LaunchController<MockBoard, F>,
    now: Millis,
    inputs: &MockInputs,
) {
    c.board_mut().now = now;
    c.tick(now, inputs);
}

/// Controller in ARMED (unlocked), entered at `now`
fn armed_at(now: Millis) -> LaunchController<MockBoard> {
    let mut c = controller();
    c.board_mut().now = now;
    c.enter(LaunchState::Ready);
    c.enter(LaunchState::Armed);
    c
}

/// Controller in LAUNCH_COUNTDOWN; returns it with its entry time
fn countdown_from(start: Millis) -> (LaunchController<MockBoard>, Millis) {
    let mut c = armed_at(start);
    tick_at(&mut c, start, &ARMED_LAUNCH);
    let entered = start.wrapping_add(250);
    tick_at(&mut c, entered, &ARMED_LAUNCH);
    assert_eq!(c.state(), LaunchState::LaunchCountdown);
    (c, entered)
}

/// Controller in FAULT (unlocked), entered at `now`
fn fault_at(now: Millis) -> LaunchController<MockBoard> {
    let mut c = controller();
    c.board_mut().now = now;
    c.enter(LaunchState::Fault);
    c
}

#[test]
fn test_initial_state() {
    let c = controller();
    assert_eq!(c.state(), LaunchState::Startup);
    assert!(c.is_system_locked());
    assert!(!c.is_armed());
    assert!(!c.is_launching());
    assert_eq!(c.fault_cause(), None);
    assert_eq!(c.outputs(), OutputLevels::ALL_OFF);
}

#[test]
fn test_begin_forces_outputs_safe_then_splash() {
    let mut board = MockBoard::new();
    board.now = 42;
    board.outputs = OutputLevels::new(true, true, true, true);
    let mut c = LaunchController::new(board, &LauncherConfig::default());

    c.begin();
    assert!(!c.board().outputs.relay);
    assert_eq!(c.board().outputs, OutputLevels::ALL_OFF);
    assert_eq!(c.state(), LaunchState::Splash);
    assert!(c.is_system_locked());
    assert_eq!(c.deadline(), Some(5042));
    assert_eq!(c.board().line(0), "Rocket Launcher");
    assert!(c.board().line(1).starts_with("Firmware v"));

    tick_at(&mut c, 5041, &IDLE);
    assert_eq!(c.state(), LaunchState::Splash);
    tick_at(&mut c, 5042, &IDLE);
    assert_eq!(c.state(), LaunchState::Startup);
    assert_eq!(c.board().line(0), "STARTUP");
    assert_eq!(c.board().line(1), "Self-check...");
}

#[test]
fn test_splash_uses_configured_lines() {
    let mut config = LauncherConfig::default();
    config.splash_title = crate::config::lcd_line("Pad 3");
    config.splash_subtitle = crate::config::lcd_line("Club night");
    let mut c = LaunchController::new(MockBoard::new(), &config);
    c.begin();
    assert_eq!(c.board().line(0), "Pad 3");
    assert_eq!(c.board().line(1), "Club night");
}

#[test]
fn test_entry_applies_full_configuration() {
    let config = LauncherConfig::default();
    for state in ALL_STATES {
        let mut c = controller();
        c.board_mut().now = 1000;
        c.enter(LaunchState::Ready);
        c.enter(state);

        let expected = entry(state);
        assert_eq!(c.state(), state);
        assert_eq!(c.entered_at(), 1000);
        assert_eq!(c.outputs(), expected.outputs);
        assert_eq!(c.board().outputs, expected.outputs);

        match expected.text {
            EntryText::Fixed(line1, line2) => {
                assert_eq!(c.board().line(0), line1);
                assert_eq!(c.board().line(1), line2);
            }
            EntryText::Splash => {
                assert_eq!(c.board().line(0), config.splash_title.as_str());
                assert_eq!(c.board().line(1), config.splash_subtitle.as_str());
            }
        }

        match expected.tone {
            EntryTone::Play(sequence, looping) => {
                assert_eq!(c.tone().sequence(), Some(sequence));
                assert!(c.tone().is_active());
                assert_eq!(c.tone().is_looping(), looping);
            }
            EntryTone::Stop => assert!(!c.tone().is_active()),
        }

        // Previous state was READY, which unlocks
        let locked = expected.lock == LockChange::Lock;
        assert_eq!(c.is_system_locked(), locked, "{:?}", state);
    }
}

#[test]
fn test_entry_resets_state_timers() {
    let mut c = armed_at(0);
    tick_at(&mut c, 0, &ARMED_LAUNCH);
    assert_eq!(c.launch_held_since(), Some(0));

    c.board_mut().now = 100;
    c.enter(LaunchState::Armed);
    assert_eq!(c.launch_held_since(), None);
    assert_eq!(c.entered_at(), 100);
    assert_eq!(c.deadline(), None);
}

#[test]
fn test_startup_input_active_faults_before_self_check() {
    for inputs in [ARMED_ONLY, RESET_ONLY, ARMED_LAUNCH] {
        let mut c = controller();
        tick_at(&mut c, 0, &inputs);
        assert_eq!(c.state(), LaunchState::Fault);
        assert_eq!(c.fault_cause(), Some(FaultCause::StartupInputActive));
        assert_eq!(c.self_check().items_shown(), 0);
        assert_eq!(c.board().line(0), "FAULT");
        assert!(!c.is_system_locked());
    }
}

#[test]
fn test_startup_reaches_ready() {
    let mut c = controller();
    let mut now: Millis = 0;
    let mut saw_complete = false;

    tick_at(&mut c, now, &IDLE);
    assert_eq!(c.board().line(0), "Check 1/20");
    assert_eq!(c.board().line(1), "Ignition circuit");
    assert_eq!(c.board().tone, Some(1500));

    while c.state() == LaunchState::Startup && now <= 10_000 {
        now += 100;
        tick_at(&mut c, now, &IDLE);
        if c.board().line(1) == "COMPLETE!" {
            saw_complete = true;
            assert_eq!(c.board().line(0), "Self-check");
        }
    }

    assert_eq!(c.state(), LaunchState::Ready);
    assert!(now <= 10_000);
    assert!(!c.is_system_locked());
    assert!(saw_complete);
    assert_eq!(c.self_check().items_shown(), SELF_CHECK_COUNT);
    assert_eq!(c.board().outputs, OutputLevels::new(true, false, false, false));
}

#[test]
fn test_startup_input_mid_sequence_faults() {
    let mut c = controller();
    tick_at(&mut c, 0, &IDLE);
    tick_at(&mut c, 250, &IDLE);
    tick_at(&mut c, 500, &RESET_ONLY);
    assert_eq!(c.state(), LaunchState::Fault);
    assert_eq!(c.fault_cause(), Some(FaultCause::StartupInputActive));
}

#[test]
fn test_self_check_restarts_on_entry() {
    let mut c = controller();
    tick_at(&mut c, 0, &IDLE);
    tick_at(&mut c, 250, &IDLE);
    assert_eq!(c.self_check().items_shown(), 2);

    c.board_mut().now = 300;
    c.enter(LaunchState::Startup);
    assert_eq!(c.self_check().items_shown(), 0);
    tick_at(&mut c, 300, &IDLE);
    assert_eq!(c.board().line(0), "Check 1/20");
}

#[test]
fn test_ready_arms_and_disarms() {
    let mut c = controller();
    c.enter(LaunchState::Ready);
    tick_at(&mut c, 10, &IDLE);
    assert_eq!(c.state(), LaunchState::Ready);

    tick_at(&mut c, 20, &ARMED_ONLY);
    assert!(c.is_armed());
    assert_eq!(c.board().outputs, OutputLevels::new(false, true, false, false));
    assert_eq!(c.board().line(1), "Hold LAUNCH");

    tick_at(&mut c, 30, &IDLE);
    assert_eq!(c.state(), LaunchState::Ready);
}

#[test]
fn test_locked_armed_ignores_inputs() {
    // Fresh controller is locked; ARMED keeps the lock
    let mut c = controller();
    c.enter(LaunchState::Armed);
    assert!(c.is_system_locked());

    tick_at(&mut c, 10, &IDLE);
    assert_eq!(c.state(), LaunchState::Armed);
    tick_at(&mut c, 20, &ARMED_LAUNCH);
    tick_at(&mut c, 1000, &ARMED_LAUNCH);
    assert_eq!(c.state(), LaunchState::Armed);
    assert_eq!(c.launch_held_since(), None);
}

#[test]
fn test_launch_confirm_at_threshold() {
    let mut c = armed_at(1000);
    tick_at(&mut c, 1000, &ARMED_LAUNCH);
    assert_eq!(c.launch_held_since(), Some(1000));
    tick_at(&mut c, 1249, &ARMED_LAUNCH);
    assert_eq!(c.state(), LaunchState::Armed);
    tick_at(&mut c, 1250, &ARMED_LAUNCH);
    assert_eq!(c.state(), LaunchState::LaunchCountdown);
    assert_eq!(c.entered_at(), 1250);
    assert_eq!(c.deadline(), Some(6250));
}

#[test]
fn test_launch_release_before_threshold_resets_latch() {
    let mut c = armed_at(1000);
    tick_at(&mut c, 1000, &ARMED_LAUNCH);
    tick_at(&mut c, 1249, &ARMED_LAUNCH);
    tick_at(&mut c, 1250, &ARMED_ONLY);
    assert_eq!(c.state(), LaunchState::Armed);
    assert_eq!(c.launch_held_since(), None);

    // A new press starts the confirmation from zero
    tick_at(&mut c, 1300, &ARMED_LAUNCH);
    assert_eq!(c.launch_held_since(), Some(1300));
    tick_at(&mut c, 1549, &ARMED_LAUNCH);
    assert_eq!(c.state(), LaunchState::Armed);
    tick_at(&mut c, 1550, &ARMED_LAUNCH);
    assert_eq!(c.state(), LaunchState::LaunchCountdown);
}

#[test]
fn test_countdown_display() {
    let (mut c, t) = countdown_from(0);
    assert_eq!(c.board().line(0), "COUNTDOWN");
    assert_eq!(c.board().line(1), "Hold...");

    tick_at(&mut c, t, &ARMED_LAUNCH);
    assert_eq!(c.board().line(1), "Hold 5s");
    tick_at(&mut c, t + 100, &ARMED_LAUNCH);
    assert_eq!(c.board().line(1), "Hold 5s");
    tick_at(&mut c, t + 1000, &ARMED_LAUNCH);
    assert_eq!(c.board().line(1), "Hold 4s");
    tick_at(&mut c, t + 4999, &ARMED_LAUNCH);
    assert_eq!(c.board().line(1), "Hold 0s");
    assert_eq!(c.board().line(0), "COUNTDOWN");
}

#[test]
fn test_full_launch_sequence() {
    let (mut c, t) = countdown_from(0);

    tick_at(&mut c, t + 4999, &ARMED_LAUNCH);
    assert_eq!(c.state(), LaunchState::LaunchCountdown);
    assert!(!c.board().outputs.relay);

    tick_at(&mut c, t + 5000, &ARMED_LAUNCH);
    assert!(c.is_launching());
    assert_eq!(c.board().outputs, OutputLevels::new(false, false, true, true));
    assert_eq!(c.board().tone, Some(1800));

    // Inputs no longer matter once firing
    let launching_at = t + 5000;
    tick_at(&mut c, launching_at + 4999, &IDLE);
    assert!(c.is_launching());
    assert!(c.board().outputs.relay);

    let writes = c.board().output_writes;
    tick_at(&mut c, launching_at + 5000, &IDLE);
    assert_eq!(c.state(), LaunchState::Cooldown);
    assert_eq!(c.board().outputs, OutputLevels::ALL_OFF);
    assert_eq!(c.board().output_writes, writes + 2);
    assert_eq!(c.board().tone, None);

    let cooldown_at = launching_at + 5000;
    tick_at(&mut c, cooldown_at + 4999, &IDLE);
    assert_eq!(c.state(), LaunchState::Cooldown);
    tick_at(&mut c, cooldown_at + 5000, &IDLE);
    assert_eq!(c.state(), LaunchState::Fault);
    assert_eq!(c.fault_cause(), Some(FaultCause::PostLaunchLockout));
}

#[test]
fn test_relay_only_energized_while_launching() {
    let (mut c, t) = countdown_from(0);
    let mut now = t;
    while now < t + 20_000 {
        let inputs = if c.state() == LaunchState::LaunchCountdown {
            ARMED_LAUNCH
        } else {
            IDLE
        };
        tick_at(&mut c, now, &inputs);
        assert_eq!(c.board().outputs.relay, c.state() == LaunchState::Launching);
        now += 50;
    }
    assert_eq!(c.state(), LaunchState::Fault);
}

#[test]
fn test_countdown_disarm_is_interlock_fault() {
    let (mut c, t) = countdown_from(0);
    tick_at(&mut c, t + 2000, &MockInputs {
        armed: false,
        reset: false,
        launch: true,
    });
    assert_eq!(c.state(), LaunchState::Fault);
    assert_eq!(c.fault_cause(), Some(FaultCause::InterlockBroken));
    assert_eq!(c.board().outputs, OutputLevels::ALL_OFF);
}

#[test]
fn test_countdown_release_aborts_then_rearms() {
    let (mut c, t) = countdown_from(0);
    tick_at(&mut c, t + 2000, &ARMED_ONLY);
    assert_eq!(c.state(), LaunchState::Abort);
    assert_eq!(c.board().line(0), "ABORT");
    assert!(!c.tone().is_looping());

    let abort_at = t + 2000;
    tick_at(&mut c, abort_at + 1499, &ARMED_ONLY);
    assert_eq!(c.state(), LaunchState::Abort);
    tick_at(&mut c, abort_at + 1500, &ARMED_ONLY);
    assert_eq!(c.state(), LaunchState::Armed);
    assert_eq!(c.launch_held_since(), None);
}

#[test]
fn test_abort_without_arm_returns_ready() {
    let (mut c, t) = countdown_from(0);
    tick_at(&mut c, t + 100, &ARMED_ONLY);
    assert_eq!(c.state(), LaunchState::Abort);
    tick_at(&mut c, t + 1600, &IDLE);
    assert_eq!(c.state(), LaunchState::Ready);
}

#[test]
fn test_fault_cleared_by_reset_hold() {
    let mut c = fault_at(0);
    assert_eq!(c.fault_cause(), Some(FaultCause::Commanded));
    assert!(!c.is_system_locked());

    tick_at(&mut c, 100, &RESET_ONLY);
    assert_eq!(c.reset_held_since(), Some(100));
    assert_eq!(c.board().line(1), "Reset 2s");

    tick_at(&mut c, 2599, &RESET_ONLY);
    assert_eq!(c.state(), LaunchState::Fault);
    assert_eq!(c.board().line(1), "Reset 0s");

    tick_at(&mut c, 2600, &RESET_ONLY);
    assert_eq!(c.state(), LaunchState::Ready);
    assert!(!c.is_system_locked());
    assert_eq!(c.board().tone, None);
}

#[test]
fn test_fault_reset_release_restarts_hold() {
    let mut c = fault_at(0);
    tick_at(&mut c, 100, &RESET_ONLY);
    tick_at(&mut c, 2598, &RESET_ONLY);
    tick_at(&mut c, 2599, &IDLE);
    assert_eq!(c.state(), LaunchState::Fault);
    assert_eq!(c.reset_held_since(), None);
    assert_eq!(c.board().line(1), "Disarm + Reset");

    tick_at(&mut c, 3000, &RESET_ONLY);
    assert_eq!(c.reset_held_since(), Some(3000));
    tick_at(&mut c, 5499, &RESET_ONLY);
    assert_eq!(c.state(), LaunchState::Fault);
    tick_at(&mut c, 5500, &RESET_ONLY);
    assert_eq!(c.state(), LaunchState::Ready);
}

#[test]
fn test_fault_requires_disarm() {
    let mut c = fault_at(0);
    let armed_reset = MockInputs {
        armed: true,
        reset: true,
        launch: false,
    };
    for now in (0..=6000).step_by(100) {
        tick_at(&mut c, now, &armed_reset);
        assert_eq!(c.state(), LaunchState::Fault);
        assert_eq!(c.reset_held_since(), None);
    }
    assert_eq!(c.board().line(1), "Disarm & Reset");
}

#[test]
fn test_global_fault_overrides_due_transition() {
    let mut c = LaunchController::with_fault_monitor(
        MockBoard::new(),
        &LauncherConfig::default(),
        FaultFlag::new(),
    );
    c.enter(LaunchState::Ready);
    c.enter(LaunchState::Armed);
    tick_at(&mut c, 0, &ARMED_LAUNCH);

    // Confirmation is due at 250, but the fault wins
    c.fault_monitor_mut().raise();
    tick_at(&mut c, 250, &ARMED_LAUNCH);
    assert_eq!(c.state(), LaunchState::Fault);
    assert_eq!(c.fault_cause(), Some(FaultCause::GlobalFault));
    // Tone player still runs in the faulting tick
    assert_eq!(c.board().tone, Some(800));

    // Already in FAULT: no re-entry
    tick_at(&mut c, 300, &IDLE);
    assert_eq!(c.entered_at(), 250);

    // Reset hold completes, but the anomaly blocks clearing
    for now in (400..=3000).step_by(100) {
        tick_at(&mut c, now, &RESET_ONLY);
    }
    assert_eq!(c.state(), LaunchState::Fault);

    c.fault_monitor_mut().clear();
    tick_at(&mut c, 3100, &RESET_ONLY);
    assert_eq!(c.state(), LaunchState::Ready);
}

#[test]
fn test_global_fault_from_every_state() {
    for state in ALL_STATES {
        if state == LaunchState::Fault {
            continue;
        }
        let mut flag = FaultFlag::new();
        flag.raise();
        let mut c =
            LaunchController::with_fault_monitor(MockBoard::new(), &LauncherConfig::default(), flag);
        c.enter(state);
        tick_at(&mut c, 10, &IDLE);
        assert_eq!(c.state(), LaunchState::Fault, "{:?}", state);
        assert_eq!(c.fault_cause(), Some(FaultCause::GlobalFault));
    }
}

#[test]
fn test_tick_is_idempotent() {
    let mut c = armed_at(0);
    tick_at(&mut c, 0, &ARMED_LAUNCH);
    tick_at(&mut c, 250, &ARMED_LAUNCH);
    tick_at(&mut c, 250, &ARMED_LAUNCH);
    assert_eq!(c.state(), LaunchState::LaunchCountdown);
    assert_eq!(c.entered_at(), 250);

    let mut c = fault_at(0);
    tick_at(&mut c, 100, &RESET_ONLY);
    tick_at(&mut c, 100, &RESET_ONLY);
    assert_eq!(c.reset_held_since(), Some(100));

    let mut c = controller();
    tick_at(&mut c, 0, &IDLE);
    tick_at(&mut c, 0, &IDLE);
    assert_eq!(c.self_check().items_shown(), 1);

    let (mut c, t) = countdown_from(0);
    tick_at(&mut c, t + 100, &ARMED_ONLY);
    let abort_at = t + 100;
    tick_at(&mut c, abort_at + 1500, &IDLE);
    tick_at(&mut c, abort_at + 1500, &IDLE);
    assert_eq!(c.state(), LaunchState::Ready);
    assert_eq!(c.entered_at(), abort_at + 1500);
}

#[test]
fn test_sequence_across_clock_wrap() {
    let start = u32::MAX - 100;
    let (mut c, t) = countdown_from(start);
    assert!(t < start);

    tick_at(&mut c, t.wrapping_add(4999), &ARMED_LAUNCH);
    assert_eq!(c.state(), LaunchState::LaunchCountdown);
    tick_at(&mut c, t.wrapping_add(5000), &ARMED_LAUNCH);
    assert!(c.is_launching());

    let fired = t.wrapping_add(5000);
    tick_at(&mut c, fired.wrapping_add(5000), &IDLE);
    assert_eq!(c.state(), LaunchState::Cooldown);
}

#[test]
fn test_launch_confirm_across_clock_wrap() {
    let start = u32::MAX - 10;
    let mut c = armed_at(start);
    tick_at(&mut c, start, &ARMED_LAUNCH);
    tick_at(&mut c, start.wrapping_add(249), &ARMED_LAUNCH);
    assert_eq!(c.state(), LaunchState::Armed);
    tick_at(&mut c, start.wrapping_add(250), &ARMED_LAUNCH);
    assert_eq!(c.state(), LaunchState::LaunchCountdown);
}

#[test]
fn test_armed_tone_loops() {
    let mut c = armed_at(0);
    tick_at(&mut c, 0, &ARMED_ONLY);
    assert_eq!(c.board().tone, Some(1200));
    // 180 on, 120 gap, then the second note
    tick_at(&mut c, 180, &ARMED_ONLY);
    assert_eq!(c.board().tone, None);
    tick_at(&mut c, 300, &ARMED_ONLY);
    assert_eq!(c.board().tone, Some(1600));
    // Second note plus its 700 ms gap, then back to the first
    tick_at(&mut c, 480, &ARMED_ONLY);
    tick_at(&mut c, 1180, &ARMED_ONLY);
    assert_eq!(c.board().tone, Some(1200));
}
