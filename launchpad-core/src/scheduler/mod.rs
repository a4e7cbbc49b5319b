//! Cooperative loop driver
//!
//! One [`Scheduler::poll`] is one pass of the main loop: read the clock,
//! refresh the debounced inputs, tick the controller (which advances the
//! tone player last), then let the tone channel expire timed notes. The
//! host calls it as often as it likes; nothing in a pass waits.

use launchpad_hal::InputPin;

use crate::controller::LaunchController;
use crate::input::DebouncedInputs;
use crate::log::debug;
use crate::safety::{FaultMonitor, NoFaultMonitor};
use crate::state::LaunchState;
use crate::time::Millis;
use crate::traits::Board;

/// Main loop state
#[derive(Debug)]
pub struct Scheduler<B, A, R, L, F = NoFaultMonitor>
where
    B: Board,
    F: FaultMonitor,
{
    controller: LaunchController<B, F>,
    inputs: DebouncedInputs<A, R, L>,
    /// Time of the last pass
    last_poll: Option<Millis>,
}

impl<B, A, R, L, F> Scheduler<B, A, R, L, F>
where
    B: Board,
    A: InputPin,
    R: InputPin,
    L: InputPin,
    F: FaultMonitor,
{
    /// Pair a controller with its inputs
    pub fn new(controller: LaunchController<B, F>, inputs: DebouncedInputs<A, R, L>) -> Self {
        Self {
            controller,
            inputs,
            last_poll: None,
        }
    }

    /// Safe boot; call once before the first [`poll`](Self::poll)
    pub fn begin(&mut self) {
        self.controller.begin();
    }

    /// Run one loop pass; returns the state after the pass
    pub fn poll(&mut self) -> LaunchState {
        let now = self.controller.board().millis();
        if self.last_poll == Some(now) {
            debug!("repeat pass at {=u32}", now);
        }
        self.last_poll = Some(now);

        self.inputs.refresh(now);
        self.controller.tick(now, &self.inputs);
        self.controller.board_mut().service(now);

        self.controller.state()
    }

    /// Time of the last pass
    pub fn last_poll(&self) -> Option<Millis> {
        self.last_poll
    }

    /// The controller
    pub fn controller(&self) -> &LaunchController<B, F> {
        &self.controller
    }

    /// Mutable controller access
    pub fn controller_mut(&mut self) -> &mut LaunchController<B, F> {
        &mut self.controller
    }

    /// The debounced inputs
    pub fn inputs(&self) -> &DebouncedInputs<A, R, L> {
        &self.inputs
    }
}
