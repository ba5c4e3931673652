//! Sound cues for engine events
//!
//! Playback is fire-and-forget: the engine never waits on a sink.

use std::io::Write;

use crate::game::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Food eaten
    Bite,
    /// Round over
    Crash,
}

impl SoundCue {
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::FoodConsumed { .. } => SoundCue::Bite,
            GameEvent::RoundTerminated(_) => SoundCue::Crash,
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);

    fn on_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundCue::for_event(event));
        }
    }
}

/// Rings the terminal bell. Terminals only have one sound, so the crash
/// cue rings twice.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) {
        let bells: &[u8] = match cue {
            SoundCue::Bite => b"\x07",
            SoundCue::Crash => b"\x07\x07",
        };
        // A failed beep is not worth interrupting the game for
        if let Err(err) = self.out.write_all(bells).and_then(|_| self.out.flush()) {
            log::debug!("terminal bell failed: {err}");
        }
    }
}

/// Discards every cue (`--mute`)
#[derive(Debug, Default)]
pub struct Muted;

impl AudioSink for Muted {
    fn play(&mut self, _cue: SoundCue) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, Position, TerminationCause};

    #[test]
    fn test_bell_output_per_event() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.on_events(&[
            GameEvent::FoodConsumed {
                position: Position::new(0, 0),
                score: 1,
            },
            GameEvent::RoundTerminated(TerminationCause::Collision(CollisionType::Wall)),
        ]);
        assert_eq!(bell.into_inner(), b"\x07\x07\x07".to_vec());
    }

    #[test]
    fn test_cue_mapping() {
        let crash = GameEvent::RoundTerminated(TerminationCause::PlacementExhausted);
        assert_eq!(SoundCue::for_event(&crash), SoundCue::Crash);
    }
}
