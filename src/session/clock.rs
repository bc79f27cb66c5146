/// What one second of play did to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Stopwatch advanced; nothing to enforce.
    Elapsed { elapsed: u32 },
    /// Session countdown advanced with time still on it.
    Remaining { elapsed: u32, remaining: u32 },
    /// Session countdown hit zero.
    SessionExpired { elapsed: u32 },
    /// Current-word countdown advanced with time still on it.
    WordRemaining { elapsed: u32, remaining: u32 },
    /// Current-word countdown hit zero.
    WordExpired { elapsed: u32 },
}

/// The three timing disciplines behind one abstraction. Pure state: the
/// session engine drives it once per wall-clock second and is free to
/// freeze or drop it, so pausing and cancelling cost nothing here.
#[derive(Debug, Clone)]
pub struct ModeClock {
    discipline: Discipline,
    elapsed: u32,
}

#[derive(Debug, Clone)]
enum Discipline {
    Stopwatch,
    Countdown { max_duration: u32 },
    PerWord { word_remaining: u32 },
}

impl ModeClock {
    /// Free-running stopwatch (Normal and Hidden modes).
    pub fn stopwatch() -> Self {
        Self {
            discipline: Discipline::Stopwatch,
            elapsed: 0,
        }
    }

    /// Whole-session countdown from `max_duration` seconds.
    pub fn countdown(max_duration: u32) -> Self {
        Self {
            discipline: Discipline::Countdown { max_duration },
            elapsed: 0,
        }
    }

    /// Per-word countdown, seeded with the first word's budget.
    pub fn per_word(word_duration: u32) -> Self {
        Self {
            discipline: Discipline::PerWord {
                word_remaining: word_duration,
            },
            elapsed: 0,
        }
    }

    /// Restore the elapsed value of a resumed session.
    pub fn resume_from(mut self, elapsed: u32) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Seconds left on the session countdown, if this clock has one.
    pub fn session_remaining(&self) -> Option<u32> {
        match self.discipline {
            Discipline::Countdown { max_duration } => {
                Some(max_duration.saturating_sub(self.elapsed))
            }
            _ => None,
        }
    }

    /// Seconds left on the current word, if this clock tracks one.
    pub fn word_remaining(&self) -> Option<u32> {
        match self.discipline {
            Discipline::PerWord { word_remaining } => Some(word_remaining),
            _ => None,
        }
    }

    /// Re-arm the per-word countdown when the current word changes.
    pub fn reset_word(&mut self, word_duration: u32) {
        if let Discipline::PerWord { word_remaining } = &mut self.discipline {
            *word_remaining = word_duration;
        }
    }

    /// Advance one second of play.
    pub fn tick(&mut self) -> ClockTick {
        self.elapsed += 1;
        match &mut self.discipline {
            Discipline::Stopwatch => ClockTick::Elapsed {
                elapsed: self.elapsed,
            },
            Discipline::Countdown { max_duration } => {
                let remaining = max_duration.saturating_sub(self.elapsed);
                if remaining == 0 {
                    ClockTick::SessionExpired {
                        elapsed: self.elapsed,
                    }
                } else {
                    ClockTick::Remaining {
                        elapsed: self.elapsed,
                        remaining,
                    }
                }
            }
            Discipline::PerWord { word_remaining } => {
                *word_remaining = word_remaining.saturating_sub(1);
                if *word_remaining == 0 {
                    ClockTick::WordExpired {
                        elapsed: self.elapsed,
                    }
                } else {
                    ClockTick::WordRemaining {
                        elapsed: self.elapsed,
                        remaining: *word_remaining,
                    }
                }
            }
        }
    }
}
