use std::time::{Duration, Instant};

/// Two presses closer than this count as a yank.
pub const YANK_WINDOW: Duration = Duration::from_millis(500);

/// Detects the `yy` double press.
#[derive(Debug, Default, Clone)]
pub struct YankTracker {
    last_press: Option<Instant>,
    count: u8,
}

impl YankTracker {
    pub fn press(&mut self) -> bool {
        self.press_at(Instant::now())
    }

    /// Register a press at `now`. Returns `true` when the copy should fire.
    pub fn press_at(&mut self, now: Instant) -> bool {
        let within = self
            .last_press
            .is_some_and(|last| now.saturating_duration_since(last) <= YANK_WINDOW);
        self.count = if within { self.count + 1 } else { 1 };
        self.last_press = Some(now);

        if self.count >= 2 {
            self.count = 0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_double_press_fires_once() {
        let t0 = Instant::now();
        let mut yank = YankTracker::default();
        assert!(!yank.press_at(t0));
        assert!(yank.press_at(t0 + ms(300)));
    }

    #[test]
    fn test_slow_presses_never_fire() {
        let t0 = Instant::now();
        let mut yank = YankTracker::default();
        assert!(!yank.press_at(t0));
        assert!(!yank.press_at(t0 + ms(501)));
        assert!(!yank.press_at(t0 + ms(1100)));
    }

    #[test]
    fn test_triple_press_fires_on_second() {
        let t0 = Instant::now();
        let mut yank = YankTracker::default();
        let fired: Vec<bool> = [0, 200, 400]
            .into_iter()
            .map(|offset| yank.press_at(t0 + ms(offset)))
            .collect();
        assert_eq!(fired, vec![false, true, false]);
    }
}
