use crossterm::event::{poll, Event, KeyEvent};
use tokio::time::{Duration, Instant};

/// Longest a single wait for terminal input lasts, so ticks stay on time
const MAX_IDLE_WAIT: Duration = Duration::from_millis(16);

pub struct EventHandler {
    tick_rate: Duration,
    last_tick: Instant,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            tick_rate,
            last_tick: Instant::now(),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    pub async fn next_event(&mut self) -> anyhow::Result<EventType> {
        // Check for terminal events without blocking first
        if poll(Duration::from_millis(0))? {
            match crossterm::event::read()? {
                Event::Key(key) => return Ok(EventType::Key(key)),
                Event::Resize(w, h) => return Ok(EventType::Resize(w, h)),
                _ => return Ok(EventType::Other),
            }
        }

        if self.tick_due() {
            self.last_tick = Instant::now();
            return Ok(EventType::Tick);
        }

        // Yield to background tasks until input may have arrived
        let remaining = self.tick_rate.saturating_sub(self.last_tick.elapsed());
        tokio::time::sleep(remaining.min(MAX_IDLE_WAIT)).await;
        Ok(EventType::Other)
    }

    /// Whether a full tick interval elapsed since the last tick event
    pub fn tick_due(&self) -> bool {
        self.last_tick.elapsed() >= self.tick_rate
    }
}

#[derive(Debug, Clone)]
pub enum EventType {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
    Other,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::constants::DEFAULT_TICK_RATE_MS))
    }
}
