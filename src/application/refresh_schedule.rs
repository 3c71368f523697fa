// Schedulable refresh task port
use std::time::Duration;

pub trait RefreshSchedule: Send {
    /// Starts a recurring refresh, replacing any schedule already running
    fn start(&mut self, period: Duration);

    fn stop(&mut self);

    fn is_active(&self) -> bool;
}
