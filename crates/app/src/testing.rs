//! In-memory fakes for the ports, shared by the controller and loop tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use luxplay_domain::command::PlayerCommand;
use luxplay_domain::error::{PlayerCommandError, SensorReadError};
use luxplay_domain::playback::PlaybackState;
use luxplay_domain::reading::SensorReading;
use luxplay_domain::time::Timestamp;
use luxplay_domain::volume::Volume;

use crate::ports::{Clock, PlayerSink, SensorSource};

// ── Scripted sensor ────────────────────────────────────────────

/// Sensor that replays a script of readings (`None` = read failure) and
/// then repeats the last entry forever.
#[derive(Clone, Default)]
pub struct ScriptedSensor {
    script: Arc<Mutex<VecDeque<Option<SensorReading>>>>,
    last: Arc<Mutex<Option<SensorReading>>>,
    reads: Arc<Mutex<usize>>,
    delay: Option<Duration>,
}

impl ScriptedSensor {
    pub fn always(reading: SensorReading) -> Self {
        Self::script([Some(reading)])
    }

    pub fn script(entries: impl IntoIterator<Item = Option<SensorReading>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(entries.into_iter().collect())),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push(&self, entry: Option<SensorReading>) {
        self.script.lock().unwrap().push_back(entry);
    }

    pub fn reads(&self) -> usize {
        *self.reads.lock().unwrap()
    }

    fn next_entry(&self) -> Option<SensorReading> {
        *self.reads.lock().unwrap() += 1;
        let mut script = self.script.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        match script.pop_front() {
            Some(entry) => {
                *last = entry;
                entry
            }
            None => *last,
        }
    }
}

impl SensorSource for ScriptedSensor {
    async fn read(&self) -> Result<SensorReading, SensorReadError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.next_entry()
            .ok_or_else(|| SensorReadError::Transport("bridge unreachable".into()))
    }
}

// ── Spy player ─────────────────────────────────────────────────

/// Player that records every command and can be told to fail or hang on one.
#[derive(Clone, Default)]
pub struct SpyPlayer {
    calls: Arc<Mutex<Vec<PlayerCommand>>>,
    fail_on: Arc<Mutex<Option<PlayerCommand>>>,
    hang_on: Arc<Mutex<Option<PlayerCommand>>>,
    state: Arc<Mutex<PlaybackState>>,
}

impl SpyPlayer {
    pub fn calls(&self) -> Vec<PlayerCommand> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn fail_on(&self, command: Option<PlayerCommand>) {
        *self.fail_on.lock().unwrap() = command;
    }

    pub fn hang_on(&self, command: Option<PlayerCommand>) {
        *self.hang_on.lock().unwrap() = command;
    }

    async fn record(&self, command: PlayerCommand) -> Result<(), PlayerCommandError> {
        self.calls.lock().unwrap().push(command.clone());
        let hang = self.hang_on.lock().unwrap().as_ref() == Some(&command);
        if hang {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        let fail = self.fail_on.lock().unwrap().as_ref() == Some(&command);
        if fail {
            return Err(PlayerCommandError::new(command, "injected failure"));
        }
        Ok(())
    }

    fn set_state(&self, state: PlaybackState) {
        *self.state.lock().unwrap() = state;
    }
}

impl PlayerSink for SpyPlayer {
    async fn prepare_media(&self) -> Result<(), PlayerCommandError> {
        self.record(PlayerCommand::PrepareMedia).await
    }

    async fn current_state(&self) -> Result<PlaybackState, PlayerCommandError> {
        self.record(PlayerCommand::CurrentState).await?;
        Ok(*self.state.lock().unwrap())
    }

    async fn current_volume(&self) -> Result<Option<Volume>, PlayerCommandError> {
        self.record(PlayerCommand::CurrentVolume).await?;
        Ok(None)
    }

    async fn set_volume(&self, volume: Volume) -> Result<(), PlayerCommandError> {
        self.record(PlayerCommand::SetVolume(volume)).await
    }

    async fn set_repeat(&self, enabled: bool) -> Result<(), PlayerCommandError> {
        self.record(PlayerCommand::SetRepeat(enabled)).await
    }

    async fn set_random(&self, enabled: bool) -> Result<(), PlayerCommandError> {
        self.record(PlayerCommand::SetRandom(enabled)).await
    }

    async fn next(&self) -> Result<(), PlayerCommandError> {
        self.record(PlayerCommand::Next).await
    }

    async fn play(&self) -> Result<(), PlayerCommandError> {
        self.record(PlayerCommand::Play).await?;
        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    async fn pause(&self) -> Result<(), PlayerCommandError> {
        self.record(PlayerCommand::Pause).await?;
        self.set_state(PlaybackState::Paused);
        Ok(())
    }

    async fn stop(&self) -> Result<(), PlayerCommandError> {
        self.record(PlayerCommand::Stop).await?;
        self.set_state(PlaybackState::Stopped);
        Ok(())
    }
}

// ── Manual clock ───────────────────────────────────────────────

/// Clock that only moves when told to.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    /// A clock set to the given UTC wall time on an arbitrary day.
    pub fn at(hour: u32, minute: u32) -> Self {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, hour, minute, 0).unwrap();
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::TimeDelta::from_std(by).unwrap();
    }

    pub fn set(&self, hour: u32, minute: u32) {
        *self.now.lock().unwrap() = Utc.with_ymd_and_hms(2024, 6, 1, hour, minute, 0).unwrap();
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap()
    }
}
