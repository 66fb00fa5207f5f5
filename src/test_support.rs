//! Test doubles shared by the unit tests.

use embedded_hal::delay::DelayNs;

/// `DelayNs` implementation that records every requested wait.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    calls_ns: Vec<u64>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ns(&self) -> u64 {
        self.calls_ns.iter().sum()
    }

    pub fn calls_us(&self) -> Vec<u64> {
        self.calls_ns.iter().map(|ns| ns / 1_000).collect()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls_ns.push(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.calls_ns.push(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls_ns.push(u64::from(ms) * 1_000_000);
    }
}
