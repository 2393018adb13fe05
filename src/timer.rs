use std::time::{Duration, Instant};

/// Fires at most once per `period` of monotonic time, however often it is
/// polled.
pub struct Interval {
    period: Duration,
    last_fired: Instant,
}

impl Interval {
    pub fn new(period: Duration, start: Instant) -> Self {
        Interval { period, last_fired: start }
    }

    pub fn ready(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_fired) >= self.period {
            self.last_fired = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(200);

    #[test]
    fn first_firing_waits_a_full_period() {
        let start = Instant::now();
        let mut interval = Interval::new(PERIOD, start);

        assert!(!interval.ready(start));
        assert!(!interval.ready(start + Duration::from_millis(199)));
        assert!(interval.ready(start + PERIOD));
    }

    #[test]
    fn fires_once_per_period_at_frame_rate() {
        let start = Instant::now();
        let mut interval = Interval::new(PERIOD, start);
        let frame = Duration::from_micros(16_667);

        let fired = (1..=60).filter(|i| interval.ready(start + frame * *i)).count();

        // Every twelfth frame crosses the period: one second at 60 fps fires five times.
        assert_eq!(fired, 5);
    }

    #[test]
    fn rearms_from_the_firing_time() {
        let start = Instant::now();
        let mut interval = Interval::new(PERIOD, start);
        let late = start + Duration::from_millis(350);

        assert!(interval.ready(late));
        assert!(!interval.ready(late + Duration::from_millis(100)));
        assert!(interval.ready(late + PERIOD));
    }

    #[test]
    fn clock_going_backwards_never_fires() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut interval = Interval::new(PERIOD, start);
        assert!(!interval.ready(start - Duration::from_millis(500)));
    }
}
