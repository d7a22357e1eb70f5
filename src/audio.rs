//! Host audio sinks. The terminal has no mixer, so cues are logged and may ring the bell.

use std::io::Write;

use crate::core::AudioSink;
use crate::types::SoundCue;

/// Records every cue in the log
#[derive(Debug, Default)]
pub struct LogAudio {
    muted: bool,
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("cue {}{}", cue.as_str(), if self.muted { " (muted)" } else { "" });
    }

    fn set_muted(&mut self, muted: bool) {
        if self.muted != muted {
            log::debug!("audio muted: {muted}");
        }
        self.muted = muted;
    }
}

/// Rings the terminal bell for the cues worth hearing. Landing is too frequent.
pub struct BellAudio<W: Write> {
    out: W,
    muted: bool,
    log: LogAudio,
}

impl<W: Write> BellAudio<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            muted: false,
            log: LogAudio::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for BellAudio<W> {
    fn play(&mut self, cue: SoundCue) {
        self.log.play(cue);
        if self.muted || cue == SoundCue::Land {
            return;
        }
        if let Err(err) = self.out.write_all(b"\x07").and_then(|()| self.out.flush()) {
            log::warn!("bell failed: {err}");
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.log.set_muted(muted);
        self.muted = muted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_skips_land_and_muted_cues() {
        let mut bell = BellAudio::new(Vec::new());
        bell.play(SoundCue::Land);
        bell.play(SoundCue::Clear);
        bell.set_muted(true);
        bell.play(SoundCue::Chain);
        bell.set_muted(false);
        bell.play(SoundCue::GameOver);
        assert_eq!(bell.into_inner(), b"\x07\x07".to_vec());
    }
}
