use std::time::Duration;

/// Time between single-row steps at speed 1.0.
pub const BASE_SCROLL_INTERVAL: Duration = Duration::from_secs(1);
pub const MIN_SPEED: f64 = 0.5;
pub const MAX_SPEED: f64 = 10.0;
pub const SPEED_STEP: f64 = 0.5;

/// Auto-scroll timer. Elapsed time is accumulated between ticks so that the
/// scroll rate doesn't depend on how often the event loop wakes up.
#[derive(Clone, Debug)]
pub struct AutoScroll {
    speed: f64,
    playing: bool,
    carried: Duration,
}

impl AutoScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            speed: clamp_speed(speed),
            playing: false,
            carried: Duration::ZERO,
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
        self.carried = Duration::ZERO;
    }

    pub fn faster(&mut self) {
        self.speed = clamp_speed(self.speed + SPEED_STEP);
    }

    pub fn slower(&mut self) {
        self.speed = clamp_speed(self.speed - SPEED_STEP);
    }

    pub fn interval(&self) -> Duration {
        BASE_SCROLL_INTERVAL.div_f64(self.speed)
    }

    /// Rows to scroll after `elapsed` more time has passed.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        if !self.playing {
            return 0;
        }
        let interval = self.interval();
        let mut total = self.carried + elapsed;
        let mut rows = 0;
        while total >= interval {
            total -= interval;
            rows += 1;
        }
        self.carried = total;
        rows
    }
}

fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        return MIN_SPEED;
    }
    let stepped = (speed / SPEED_STEP).round() * SPEED_STEP;
    stepped.clamp(MIN_SPEED, MAX_SPEED)
}
