//! Parsing of `mpc status` output.
//!
//! ```text
//! Artist - Title
//! [playing] #3/12   0:41/3:55 (17%)
//! volume: 40%   repeat: on    random: on    single: off   consume: off
//! ```
//!
//! A stopped player prints only the last line.

use luxplay_domain::playback::PlaybackState;
use luxplay_domain::volume::Volume;

/// Playback state reported by `mpc status`.
#[must_use]
pub fn parse_state(output: &str) -> PlaybackState {
    for line in output.lines() {
        let line = line.trim_start();
        if line.starts_with("[playing]") {
            return PlaybackState::Playing;
        }
        if line.starts_with("[paused]") {
            return PlaybackState::Paused;
        }
    }
    PlaybackState::Stopped
}

/// Mixer volume reported by `mpc status`, `None` when MPD has no mixer.
#[must_use]
pub fn parse_volume(output: &str) -> Option<Volume> {
    output.lines().find_map(|line| {
        let rest = line.trim_start().strip_prefix("volume:")?;
        let value = rest.trim_start().split('%').next()?.trim();
        value.parse::<i64>().ok().and_then(|v| Volume::try_from(v).ok())
    })
}
