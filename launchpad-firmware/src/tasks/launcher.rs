//! Launcher loop
//!
//! Polls the scheduler on a fixed ticker. A pass never waits, so the
//! ticker period bounds how late any deadline can be noticed.

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::board::LaunchScheduler;

/// Loop period in milliseconds
pub const LOOP_INTERVAL_MS: u64 = 1;

/// Run the launch controller forever
pub async fn run_launcher(mut scheduler: LaunchScheduler) -> ! {
    scheduler.begin();
    info!("Launcher loop started, state {}", scheduler.controller().state());

    let mut ticker = Ticker::every(Duration::from_millis(LOOP_INTERVAL_MS));
    loop {
        ticker.next().await;
        scheduler.poll();
    }
}
