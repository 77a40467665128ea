//! `setTimeout`-backed scheduler

use std::time::Duration;

use gloo_timers::callback::Timeout;
use medibook::scheduler::{Scheduler, Task};

/// Runs tasks through the browser's timer queue
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }
}
