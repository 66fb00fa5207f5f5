//! Conversion trigger / status-poll state machine shared by both drivers.
//!
//! Completion is only ever observed by polling a status register. Every wait
//! is bounded by a [`PollPolicy`] and ends in [`Error::Timeout`] instead of
//! spinning forever.

use embedded_hal::delay::DelayNs;

use crate::error::{Error, Result};

/// Progress of the most recent conversion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionState {
    /// Nothing has been triggered since configuration.
    #[default]
    Idle,
    /// A conversion was started and completion has not been observed yet.
    Triggered,
    /// A status poll reported completion; data registers are valid.
    Done,
}

/// Bound applied to a status wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollPolicy {
    /// Maximum number of status reads before giving up.
    pub max_polls: u32,
    /// Delay between two status reads, in microseconds.
    pub interval_us: u32,
}

impl PollPolicy {
    /// Creates a policy from a poll count and an interval.
    pub const fn new(max_polls: u32, interval_us: u32) -> Self {
        Self { max_polls, interval_us }
    }

    /// Upper bound of the time spent waiting, in microseconds.
    pub const fn budget_us(&self) -> u64 {
        self.max_polls as u64 * self.interval_us as u64
    }
}

impl Default for PollPolicy {
    /// 300 polls 10 ms apart, enough for a full 20-channel LTC2983 sweep.
    fn default() -> Self {
        Self::new(300, 10_000)
    }
}

/// Polls `is_done` until it reports completion or the policy is exhausted.
///
/// Returns the number of status reads performed. No delay is inserted before
/// the first read nor after the last one.
pub(crate) fn poll_until<E, F>(
    delay: &mut impl DelayNs,
    policy: PollPolicy,
    mut is_done: F,
) -> Result<u32, E>
where
    F: FnMut() -> Result<bool, E>,
{
    for attempt in 1..=policy.max_polls {
        if is_done()? {
            return Ok(attempt);
        }
        if attempt < policy.max_polls {
            delay.delay_us(policy.interval_us);
        }
    }

    warn!("status poll timed out after {} reads", policy.max_polls);
    Err(Error::Timeout)
}

#[cfg(test)]
mod tests {
    use super::{poll_until, PollPolicy};
    use crate::error::Error;
    use crate::test_support::RecordingDelay;
    use core::convert::Infallible;

    #[test]
    fn returns_on_first_completed_read() {
        let mut delay = RecordingDelay::new();
        let mut replies = [false, false, false, true].into_iter();

        let polls = poll_until::<Infallible, _>(&mut delay, PollPolicy::new(10, 50), || {
            Ok(replies.next().unwrap_or(false))
        })
        .unwrap();

        assert_eq!(polls, 4);
        assert_eq!(delay.calls_us(), vec![50, 50, 50]);
    }

    #[test]
    fn exhausting_the_bound_is_a_timeout() {
        let mut delay = RecordingDelay::new();
        let mut reads = 0;

        let result = poll_until::<Infallible, _>(&mut delay, PollPolicy::new(5, 100), || {
            reads += 1;
            Ok(false)
        });

        assert_eq!(result, Err(Error::Timeout));
        assert_eq!(reads, 5);
        assert_eq!(delay.total_ns(), 4 * 100_000);
    }

    #[test]
    fn zero_poll_budget_times_out_without_reading() {
        let mut delay = RecordingDelay::new();
        let result = poll_until::<Infallible, _>(&mut delay, PollPolicy::new(0, 100), || {
            panic!("status must not be read")
        });
        assert_eq!(result, Err(Error::Timeout));
    }

    #[test]
    fn bus_errors_abort_the_wait() {
        let mut delay = RecordingDelay::new();
        let result = poll_until::<u8, _>(&mut delay, PollPolicy::default(), || Err(Error::Bus(7)));
        assert_eq!(result, Err(Error::Bus(7)));
    }

    #[test]
    fn budget_is_polls_times_interval() {
        assert_eq!(PollPolicy::default().budget_us(), 3_000_000);
    }
}
