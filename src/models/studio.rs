// Studio transport and arrangement timeline. Plain state, no simulation attached.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, check_range};

pub const BPM_MIN: f64 = 60.0;
pub const BPM_MAX: f64 = 200.0;
pub const SKIP_SECS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transport {
    pub playing: bool,
    pub position_secs: f64,
    pub bpm: f64,
    pub master_volume: f64,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            playing: false,
            position_secs: 0.0,
            bpm: 120.0,
            master_volume: 75.0,
        }
    }
}

impl Transport {
    pub fn play_pause(&mut self) {
        self.playing = !self.playing;
    }

    /// Halts playback and rewinds to the start.
    pub fn stop(&mut self) {
        self.playing = false;
        self.position_secs = 0.0;
    }

    pub fn skip_back(&mut self) {
        self.position_secs = (self.position_secs - SKIP_SECS).max(0.0);
    }

    pub fn skip_forward(&mut self) {
        self.position_secs += SKIP_SECS;
    }

    pub fn set_bpm(&mut self, bpm: f64) -> Result<(), EngineError> {
        check_range("bpm", bpm, BPM_MIN, BPM_MAX)?;
        self.bpm = bpm;
        Ok(())
    }

    pub fn set_master_volume(&mut self, volume: f64) -> Result<(), EngineError> {
        check_range("masterVolume", volume, 0.0, 100.0)?;
        self.master_volume = volume;
        Ok(())
    }

    pub fn position_label(&self) -> String {
        format_time(self.position_secs)
    }
}

/// `m:ss`, fractional seconds truncated.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

pub const TIMELINE_SECS: f64 = 32.0;
pub const TIMELINE_BASE_WIDTH: f64 = 800.0;
pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    /// Id of the mixer track the clip sits on.
    pub track_id: String,
    pub name: String,
    pub start: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipPosition {
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub zoom: f64,
    pub show_grid: bool,
    pub clips: Vec<Clip>,
}

impl Timeline {
    pub fn new(clips: Vec<Clip>) -> Self {
        Self {
            zoom: 1.0,
            show_grid: true,
            clips,
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(ZOOM_MIN);
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    pub fn width(&self) -> f64 {
        TIMELINE_BASE_WIDTH * self.zoom
    }

    pub fn clip_position(&self, clip: &Clip) -> ClipPosition {
        let width = self.width();
        ClipPosition {
            left: clip.start / TIMELINE_SECS * width,
            width: clip.duration / TIMELINE_SECS * width,
        }
    }

    pub fn view(&self) -> TimelineView {
        TimelineView {
            zoom: self.zoom,
            show_grid: self.show_grid,
            width: self.width(),
            duration_secs: TIMELINE_SECS,
            clips: self
                .clips
                .iter()
                .map(|clip| PlacedClip {
                    clip: clip.clone(),
                    position: self.clip_position(clip),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedClip {
    #[serde(flatten)]
    pub clip: Clip,
    pub position: ClipPosition,
}

/// Timeline with pixel positions resolved for the current zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineView {
    pub zoom: f64,
    pub show_grid: bool,
    pub width: f64,
    pub duration_secs: f64,
    pub clips: Vec<PlacedClip>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    PlayPause,
    Stop,
    Back,
    Forward,
}

impl std::str::FromStr for TransportCommand {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play-pause" => Ok(Self::PlayPause),
            "stop" => Ok(Self::Stop),
            "back" => Ok(Self::Back),
            "forward" => Ok(Self::Forward),
            other => Err(EngineError::UnknownCommand(other.to_string())),
        }
    }
}

impl Transport {
    pub fn apply(&mut self, command: TransportCommand) {
        match command {
            TransportCommand::PlayPause => self.play_pause(),
            TransportCommand::Stop => self.stop(),
            TransportCommand::Back => self.skip_back(),
            TransportCommand::Forward => self.skip_forward(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineCommand {
    ZoomIn,
    ZoomOut,
    Grid,
}

impl std::str::FromStr for TimelineCommand {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zoom-in" => Ok(Self::ZoomIn),
            "zoom-out" => Ok(Self::ZoomOut),
            "grid" => Ok(Self::Grid),
            other => Err(EngineError::UnknownCommand(other.to_string())),
        }
    }
}

impl Timeline {
    pub fn apply(&mut self, command: TimelineCommand) {
        match command {
            TimelineCommand::ZoomIn => self.zoom_in(),
            TimelineCommand::ZoomOut => self.zoom_out(),
            TimelineCommand::Grid => self.toggle_grid(),
        }
    }
}
