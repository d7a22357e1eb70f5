//! Audio collaborator seam
//!
//! The engine never plays sound itself. Hosts drain [`GameEvent`]s and forward the
//! derived cues to an [`AudioSink`]; playback is fire-and-forget.

use crate::types::{GameEvent, SoundCue};

pub trait AudioSink {
    /// Play one cue; must not block on playback
    fn play(&mut self, cue: SoundCue);

    /// Mute or unmute background audio (muted while paused)
    fn set_muted(&mut self, muted: bool);
}

/// Sink that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}

    fn set_muted(&mut self, _muted: bool) {}
}

/// Forward the cue of every event to `sink`, in order. Returns the number played.
pub fn dispatch_cues<S: AudioSink + ?Sized>(events: &[GameEvent], sink: &mut S) -> usize {
    let mut played = 0usize;
    for cue in events.iter().filter_map(GameEvent::sound_cue) {
        sink.play(cue);
        played += 1;
    }
    played
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        cues: Vec<SoundCue>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue) {
            self.cues.push(cue);
        }

        fn set_muted(&mut self, _muted: bool) {}
    }

    #[test]
    fn dispatch_skips_silent_events() {
        let events = [
            GameEvent::PieceLanded,
            GameEvent::MatchCleared {
                cleared: 4,
                chain: 2,
                score_delta: 160,
            },
            GameEvent::Chain { count: 2 },
            GameEvent::LevelUp { level: 2 },
        ];
        let mut rec = Recorder::default();
        assert_eq!(dispatch_cues(&events, &mut rec), 3);
        assert_eq!(rec.cues, vec![SoundCue::Land, SoundCue::Chain, SoundCue::LevelUp]);
    }
}
