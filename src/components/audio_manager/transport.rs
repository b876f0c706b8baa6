//! Pure playback state. Holds what the player *intends*; the per-platform
//! controllers reconcile the real media element against it and feed
//! position/duration observations back in.

use crate::api::models::AudioTrack;
use crate::db::PlaybackSpeed;

pub const SKIP_SECONDS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerPhase {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
    Ended,
}

/// What the caller should do with the media handle after a load request.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadDecision {
    /// Same track already loading, or nothing to do.
    Rejected,
    /// Same track was paused or just ended; resume the existing handle.
    Resume,
    /// Acquire a new source. `release_previous` means an old handle must be
    /// torn down first.
    Load {
        epoch: u64,
        url: String,
        release_previous: bool,
    },
}

#[derive(Debug, Clone)]
pub struct Transport {
    phase: PlayerPhase,
    track: Option<AudioTrack>,
    load_epoch: u64,
    position: f64,
    duration: f64,
    volume: f64,
    speed: PlaybackSpeed,
    last_error: Option<String>,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            phase: PlayerPhase::Idle,
            track: None,
            load_epoch: 0,
            position: 0.0,
            duration: 0.0,
            // A fresh media element plays at full volume until settings load.
            volume: 1.0,
            speed: PlaybackSpeed::default(),
            last_error: None,
        }
    }
}

/// Accept volume on either a 0..1 or 0..100 scale and clamp to 0..1.
pub fn normalize_volume(mut volume: f64) -> f64 {
    if !volume.is_finite() {
        return 1.0;
    }
    while volume > 1.0 {
        volume /= 100.0;
    }
    volume.clamp(0.0, 1.0)
}

impl Transport {
    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    pub fn track(&self) -> Option<&AudioTrack> {
        self.track.as_ref()
    }

    pub fn load_epoch(&self) -> u64 {
        self.load_epoch
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True when `epoch` still refers to the live load. Stale async results
    /// must be dropped by the caller when this returns false.
    pub fn is_current(&self, epoch: u64) -> bool {
        self.load_epoch == epoch && self.track.is_some()
    }

    /// Decide how to honor a play request for `track`.
    pub fn begin_load(&mut self, track: AudioTrack) -> LoadDecision {
        if track.url.is_empty() {
            self.last_error = Some("This lecture has no playable audio source.".to_string());
            return LoadDecision::Rejected;
        }

        let same_track = self
            .track
            .as_ref()
            .map(|current| current.id == track.id)
            .unwrap_or(false);

        if same_track {
            match self.phase {
                PlayerPhase::Loading => return LoadDecision::Rejected,
                PlayerPhase::Paused => {
                    self.phase = PlayerPhase::Playing;
                    self.last_error = None;
                    return LoadDecision::Resume;
                }
                // The handle stays live after a natural end; play() restarts
                // it from the top without a reload or a second count bump.
                PlayerPhase::Ended => {
                    self.phase = PlayerPhase::Playing;
                    self.position = 0.0;
                    self.last_error = None;
                    return LoadDecision::Resume;
                }
                PlayerPhase::Playing => return LoadDecision::Rejected,
                PlayerPhase::Idle => {}
            }
        }

        let release_previous = self.track.is_some();
        self.load_epoch += 1;
        self.phase = PlayerPhase::Loading;
        self.position = 0.0;
        self.duration = f64::from(track.duration);
        self.last_error = None;
        let url = track.url.clone();
        self.track = Some(track);

        LoadDecision::Load {
            epoch: self.load_epoch,
            url,
            release_previous,
        }
    }

    /// The media element for `epoch` became playable. Returns the track id
    /// exactly once per successful load so the caller can fire one
    /// play-count bump.
    pub fn media_ready(&mut self, epoch: u64) -> Option<String> {
        if !self.is_current(epoch) || self.phase != PlayerPhase::Loading {
            return None;
        }
        self.phase = PlayerPhase::Playing;
        self.track.as_ref().map(|t| t.id.clone())
    }

    /// A load failed before becoming playable. Stale epochs are ignored.
    pub fn fail_load(&mut self, epoch: u64, message: impl Into<String>) {
        if !self.is_current(epoch) || self.phase != PlayerPhase::Loading {
            return;
        }
        self.phase = PlayerPhase::Idle;
        self.track = None;
        self.position = 0.0;
        self.duration = 0.0;
        self.last_error = Some(message.into());
    }

    /// Resuming an existing handle failed; the track stays loaded and paused.
    /// Rejections from a superseded load carry a stale epoch and are dropped.
    pub fn fail_resume(&mut self, epoch: u64, message: impl Into<String>) {
        if !self.is_current(epoch) {
            return;
        }
        self.phase = PlayerPhase::Paused;
        self.last_error = Some(message.into());
    }

    pub fn pause(&mut self) {
        if self.phase == PlayerPhase::Playing {
            self.phase = PlayerPhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == PlayerPhase::Paused {
            self.phase = PlayerPhase::Playing;
            self.last_error = None;
        }
    }

    pub fn seek_to(&mut self, position: f64) -> Option<f64> {
        if self.track.is_none() || !position.is_finite() {
            return None;
        }
        let clamped = self.clamp_position(position);
        self.position = clamped;
        Some(clamped)
    }

    pub fn skip_forward(&mut self) -> Option<f64> {
        let target = self.position + SKIP_SECONDS;
        self.seek_to(target)
    }

    pub fn skip_backward(&mut self) -> Option<f64> {
        let target = self.position - SKIP_SECONDS;
        self.seek_to(target)
    }

    /// Poller observation; does not clamp against a possibly stale duration.
    pub fn sync_position(&mut self, position: f64) {
        if self.track.is_some() && position.is_finite() && position >= 0.0 {
            self.position = position;
        }
    }

    pub fn sync_duration(&mut self, duration: f64) {
        if self.track.is_some() && duration.is_finite() && duration > 0.0 {
            self.duration = duration;
        }
    }

    pub fn set_volume(&mut self, volume: f64) -> f64 {
        self.volume = normalize_volume(volume);
        self.volume
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    pub fn cycle_speed(&mut self) -> PlaybackSpeed {
        self.speed = self.speed.next();
        self.speed
    }

    /// Natural end of the track. Position winds back to the start; the
    /// handle stays live so the same track can restart without a teardown.
    pub fn ended(&mut self) {
        if self.track.is_none() {
            return;
        }
        self.phase = PlayerPhase::Ended;
        self.position = 0.0;
    }

    pub fn note_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    fn clamp_position(&self, position: f64) -> f64 {
        let upper = if self.duration > 0.0 {
            self.duration
        } else {
            f64::MAX
        };
        position.clamp(0.0, upper)
    }
}

/// How often listening progress is pushed to the backend, in playback
/// seconds. Writes are at-least-once; duplicates merge server-side.
pub const HISTORY_EMIT_SECONDS: f64 = 5.0;

/// One sampled reading of the platform media element.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaObservation {
    pub position: f64,
    pub duration: f64,
    pub paused: bool,
    pub ended: bool,
    pub ready: bool,
    pub error_code: Option<u16>,
}

/// Side effects the polling loop must run after a reconciliation step.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEffect {
    BumpPlayCount {
        track_id: String,
    },
    EmitHistory {
        track_id: String,
        position: f64,
        completed: bool,
    },
    /// Media became ready while still paused; kick playback.
    StartPlayback,
}

/// HTMLMediaElement error codes map onto user-facing messages.
pub fn media_error_message(code: u16) -> String {
    match code {
        1 => "Playback was aborted before the lecture loaded.",
        2 => "Network error while loading this lecture.",
        3 => "Audio playback failed due to a decode error.",
        4 => "No supported audio source was found for this lecture.",
        _ => "Unable to load this audio source.",
    }
    .to_string()
}

/// Reconciles periodic media observations against the transport. Both
/// platform controllers drive one of these from their polling loop; keeping
/// it pure keeps the streak and dedupe rules testable.
#[derive(Debug, Default)]
pub struct PollReconciler {
    paused_streak: u8,
    playing_streak: u8,
    ended_for_track: Option<String>,
    last_duration: f64,
    last_history_position: Option<f64>,
}

impl PollReconciler {
    pub fn step(&mut self, transport: &mut Transport, obs: MediaObservation) -> Vec<PollEffect> {
        let mut effects = Vec::new();
        let Some(track_id) = transport.track().map(|t| t.id.clone()) else {
            *self = Self::default();
            return effects;
        };
        let epoch = transport.load_epoch();

        if let Some(code) = obs.error_code {
            let message = media_error_message(code);
            if transport.phase() == PlayerPhase::Loading {
                transport.fail_load(epoch, message);
                return effects;
            }
            if transport.last_error() != Some(message.as_str()) {
                transport.note_error(message);
            }
        }

        if transport.phase() == PlayerPhase::Loading && (obs.ready || !obs.paused) {
            if let Some(ready_track) = transport.media_ready(epoch) {
                effects.push(PollEffect::BumpPlayCount {
                    track_id: ready_track,
                });
                if obs.paused {
                    effects.push(PollEffect::StartPlayback);
                }
            }
        }

        // Ended comes before position sync and the streak check so a
        // finished track neither reads as an external pause nor drags the
        // wound-back position forward again.
        if obs.ended {
            if self.ended_for_track.as_deref() != Some(track_id.as_str()) {
                self.ended_for_track = Some(track_id.clone());
                transport.ended();
                self.last_history_position = None;
                effects.push(PollEffect::EmitHistory {
                    track_id,
                    position: transport.duration(),
                    completed: true,
                });
            }
            return effects;
        }
        self.ended_for_track = None;

        transport.sync_position(obs.position);
        if obs.duration > 0.0 && (obs.duration - self.last_duration).abs() > 0.5 {
            self.last_duration = obs.duration;
            transport.sync_duration(obs.duration);
        }

        // Playback can be toggled outside the app UI (hardware keys, media
        // session). Two consecutive disagreeing polls win over the intent.
        match transport.phase() {
            PlayerPhase::Playing | PlayerPhase::Paused => {
                if obs.paused {
                    self.paused_streak = self.paused_streak.saturating_add(1);
                    self.playing_streak = 0;
                } else {
                    self.playing_streak = self.playing_streak.saturating_add(1);
                    self.paused_streak = 0;
                }
                if transport.phase() == PlayerPhase::Playing && self.paused_streak >= 2 {
                    transport.pause();
                } else if transport.phase() == PlayerPhase::Paused && self.playing_streak >= 2 {
                    transport.resume();
                }
            }
            _ => {
                self.paused_streak = 0;
                self.playing_streak = 0;
            }
        }

        if transport.phase() == PlayerPhase::Playing && !obs.paused {
            let due = match self.last_history_position {
                Some(last) => (obs.position - last).abs() >= HISTORY_EMIT_SECONDS,
                None => obs.position > 0.0,
            };
            if due {
                self.last_history_position = Some(obs.position);
                effects.push(PollEffect::EmitHistory {
                    track_id,
                    position: obs.position,
                    completed: false,
                });
            }
        }

        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, duration: u32) -> AudioTrack {
        AudioTrack {
            id: id.into(),
            title: format!("Track {id}"),
            url: format!("https://cdn.example.com/{id}.mp3"),
            duration,
            ..Default::default()
        }
    }

    fn loaded(transport: &mut Transport, id: &str, duration: u32) -> u64 {
        match transport.begin_load(track(id, duration)) {
            LoadDecision::Load { epoch, .. } => {
                transport.media_ready(epoch);
                epoch
            }
            other => panic!("expected a fresh load, got {other:?}"),
        }
    }

    #[test]
    fn fresh_load_moves_through_loading_to_playing() {
        let mut transport = Transport::default();
        let decision = transport.begin_load(track("a", 120));
        let LoadDecision::Load {
            epoch,
            release_previous,
            ..
        } = decision
        else {
            panic!("expected load");
        };
        assert!(!release_previous);
        assert_eq!(transport.phase(), PlayerPhase::Loading);

        let bumped = transport.media_ready(epoch);
        assert_eq!(bumped.as_deref(), Some("a"));
        assert_eq!(transport.phase(), PlayerPhase::Playing);
    }

    #[test]
    fn media_ready_fires_once_per_load() {
        let mut transport = Transport::default();
        let epoch = loaded(&mut transport, "a", 120);
        assert_eq!(transport.media_ready(epoch), None);
    }

    #[test]
    fn swapping_tracks_requires_releasing_the_old_handle() {
        let mut transport = Transport::default();
        loaded(&mut transport, "a", 120);

        let decision = transport.begin_load(track("b", 90));
        let LoadDecision::Load {
            release_previous, ..
        } = decision
        else {
            panic!("expected load");
        };
        assert!(release_previous);
        assert_eq!(transport.phase(), PlayerPhase::Loading);
        assert_eq!(transport.position(), 0.0);
    }

    #[test]
    fn requesting_the_paused_track_resumes_instead_of_reloading() {
        let mut transport = Transport::default();
        transport.set_volume(0.4);
        loaded(&mut transport, "a", 120);
        transport.pause();

        let decision = transport.begin_load(track("a", 120));
        assert_eq!(decision, LoadDecision::Resume);
        assert_eq!(transport.phase(), PlayerPhase::Playing);
        // settings survive the resume untouched
        assert_eq!(transport.volume(), 0.4);
    }

    #[test]
    fn duplicate_request_while_loading_is_rejected() {
        let mut transport = Transport::default();
        transport.begin_load(track("a", 120));
        assert_eq!(transport.begin_load(track("a", 120)), LoadDecision::Rejected);
    }

    #[test]
    fn stale_epoch_results_are_dropped() {
        let mut transport = Transport::default();
        let LoadDecision::Load { epoch: first, .. } = transport.begin_load(track("a", 120)) else {
            panic!("expected load");
        };
        // user swaps tracks before the first load settles
        transport.begin_load(track("b", 90));

        assert_eq!(transport.media_ready(first), None);
        transport.fail_load(first, "network error");
        assert_eq!(transport.phase(), PlayerPhase::Loading);
        assert_eq!(transport.track().map(|t| t.id.as_str()), Some("b"));
    }

    #[test]
    fn failed_load_resets_to_idle_with_a_message() {
        let mut transport = Transport::default();
        let LoadDecision::Load { epoch, .. } = transport.begin_load(track("a", 120)) else {
            panic!("expected load");
        };
        transport.fail_load(epoch, "decode error");
        assert_eq!(transport.phase(), PlayerPhase::Idle);
        assert!(transport.track().is_none());
        assert_eq!(transport.last_error(), Some("decode error"));
    }

    #[test]
    fn failed_resume_keeps_the_track_paused() {
        let mut transport = Transport::default();
        let epoch = loaded(&mut transport, "a", 120);
        transport.pause();
        transport.resume();
        transport.fail_resume(epoch, "playback blocked");
        assert_eq!(transport.phase(), PlayerPhase::Paused);
        assert!(transport.track().is_some());
    }

    #[test]
    fn stale_play_rejections_do_not_touch_the_new_load() {
        let mut transport = Transport::default();
        let first = loaded(&mut transport, "a", 120);
        // user swaps tracks while the old play() promise is still in flight
        transport.begin_load(track("b", 90));

        transport.fail_resume(first, "playback blocked");
        assert_eq!(transport.phase(), PlayerPhase::Loading);
        assert!(transport.last_error().is_none());
        assert_eq!(transport.track().map(|t| t.id.as_str()), Some("b"));
    }

    #[test]
    fn skips_accumulate_and_clamp_to_the_ends() {
        let mut transport = Transport::default();
        loaded(&mut transport, "a", 120);

        transport.seek_to(0.0);
        transport.skip_forward();
        transport.skip_forward();
        transport.skip_forward();
        assert_eq!(transport.position(), 30.0);

        transport.seek_to(115.0);
        transport.skip_forward();
        assert_eq!(transport.position(), 120.0);

        transport.seek_to(5.0);
        transport.skip_backward();
        assert_eq!(transport.position(), 0.0);
    }

    #[test]
    fn seek_clamps_into_track_bounds() {
        let mut transport = Transport::default();
        loaded(&mut transport, "a", 120);
        assert_eq!(transport.seek_to(500.0), Some(120.0));
        assert_eq!(transport.seek_to(-3.0), Some(0.0));
    }

    #[test]
    fn seek_without_a_track_is_a_no_op() {
        let mut transport = Transport::default();
        assert_eq!(transport.seek_to(10.0), None);
        assert_eq!(transport.skip_forward(), None);
    }

    #[test]
    fn ended_stops_playback_and_rewinds() {
        let mut transport = Transport::default();
        loaded(&mut transport, "a", 120);
        transport.sync_position(119.4);
        transport.ended();
        assert_eq!(transport.phase(), PlayerPhase::Ended);
        assert_eq!(transport.position(), 0.0);
    }

    #[test]
    fn empty_url_tracks_are_rejected() {
        let mut transport = Transport::default();
        let mut no_source = track("a", 120);
        no_source.url = String::new();
        assert_eq!(transport.begin_load(no_source), LoadDecision::Rejected);
        assert_eq!(transport.phase(), PlayerPhase::Idle);
        assert!(transport.last_error().is_some());
    }

    #[test]
    fn pause_resume_round_trip_restores_playing() {
        let mut transport = Transport::default();
        loaded(&mut transport, "a", 120);
        transport.pause();
        transport.resume();
        assert_eq!(transport.phase(), PlayerPhase::Playing);
    }

    #[test]
    fn replaying_an_ended_track_resumes_without_a_reload() {
        let mut transport = Transport::default();
        let epoch = loaded(&mut transport, "a", 120);
        transport.ended();

        let decision = transport.begin_load(track("a", 120));
        assert_eq!(decision, LoadDecision::Resume);
        assert_eq!(transport.phase(), PlayerPhase::Playing);
        assert_eq!(transport.position(), 0.0);
        // same epoch: no reload happened, so media_ready cannot fire a
        // second play-count bump
        assert_eq!(transport.load_epoch(), epoch);
        assert_eq!(transport.media_ready(epoch), None);
    }

    #[test]
    fn volume_and_speed_survive_track_swaps() {
        let mut transport = Transport::default();
        transport.set_volume(0.3);
        transport.set_speed(PlaybackSpeed::Double);
        loaded(&mut transport, "a", 120);
        loaded(&mut transport, "b", 90);
        assert_eq!(transport.volume(), 0.3);
        assert_eq!(transport.speed(), PlaybackSpeed::Double);
    }

    #[test]
    fn volume_normalization_accepts_percent_scale() {
        assert_eq!(normalize_volume(80.0), 0.8);
        assert_eq!(normalize_volume(0.5), 0.5);
        assert_eq!(normalize_volume(-1.0), 0.0);
        assert_eq!(normalize_volume(1.0), 1.0);
    }

    #[test]
    fn cycle_speed_advances_the_enumerated_multipliers() {
        let mut transport = Transport::default();
        assert_eq!(transport.cycle_speed(), PlaybackSpeed::Faster);
        assert_eq!(transport.cycle_speed(), PlaybackSpeed::Fast);
        assert_eq!(transport.cycle_speed(), PlaybackSpeed::Double);
        assert_eq!(transport.cycle_speed(), PlaybackSpeed::Normal);
    }

    fn playing_obs(position: f64) -> MediaObservation {
        MediaObservation {
            position,
            duration: 120.0,
            paused: false,
            ready: true,
            ..Default::default()
        }
    }

    #[test]
    fn reconciler_bumps_play_count_once_when_media_becomes_ready() {
        let mut transport = Transport::default();
        let mut poll = PollReconciler::default();
        transport.begin_load(track("a", 120));

        let effects = poll.step(&mut transport, playing_obs(0.0));
        assert!(effects.contains(&PollEffect::BumpPlayCount {
            track_id: "a".into()
        }));
        assert_eq!(transport.phase(), PlayerPhase::Playing);

        let effects = poll.step(&mut transport, playing_obs(0.2));
        assert!(!effects
            .iter()
            .any(|e| matches!(e, PollEffect::BumpPlayCount { .. })));
    }

    #[test]
    fn reconciler_kicks_playback_when_ready_but_paused() {
        let mut transport = Transport::default();
        let mut poll = PollReconciler::default();
        transport.begin_load(track("a", 120));

        let obs = MediaObservation {
            duration: 120.0,
            paused: true,
            ready: true,
            ..Default::default()
        };
        let effects = poll.step(&mut transport, obs);
        assert!(effects.contains(&PollEffect::StartPlayback));
    }

    #[test]
    fn reconciler_fails_the_load_on_a_media_error() {
        let mut transport = Transport::default();
        let mut poll = PollReconciler::default();
        transport.begin_load(track("a", 120));

        let obs = MediaObservation {
            paused: true,
            error_code: Some(2),
            ..Default::default()
        };
        let effects = poll.step(&mut transport, obs);
        assert!(effects.is_empty());
        assert_eq!(transport.phase(), PlayerPhase::Idle);
        assert_eq!(
            transport.last_error(),
            Some("Network error while loading this lecture.")
        );
    }

    #[test]
    fn reconciler_adopts_an_external_pause_after_two_polls() {
        let mut transport = Transport::default();
        let mut poll = PollReconciler::default();
        loaded(&mut transport, "a", 120);

        let paused_obs = MediaObservation {
            position: 10.0,
            duration: 120.0,
            paused: true,
            ready: true,
            ..Default::default()
        };
        poll.step(&mut transport, paused_obs);
        assert_eq!(transport.phase(), PlayerPhase::Playing);
        poll.step(&mut transport, paused_obs);
        assert_eq!(transport.phase(), PlayerPhase::Paused);
    }

    #[test]
    fn reconciler_throttles_history_emission() {
        let mut transport = Transport::default();
        let mut poll = PollReconciler::default();
        transport.begin_load(track("a", 120));
        poll.step(&mut transport, playing_obs(0.0));

        let history_emits = |effects: &[PollEffect]| {
            effects
                .iter()
                .filter(|e| matches!(e, PollEffect::EmitHistory { .. }))
                .count()
        };

        assert_eq!(history_emits(&poll.step(&mut transport, playing_obs(1.0))), 1);
        assert_eq!(history_emits(&poll.step(&mut transport, playing_obs(2.0))), 0);
        assert_eq!(history_emits(&poll.step(&mut transport, playing_obs(4.0))), 0);
        assert_eq!(history_emits(&poll.step(&mut transport, playing_obs(6.5))), 1);
    }

    #[test]
    fn reconciler_emits_completed_history_exactly_once_at_the_end() {
        let mut transport = Transport::default();
        let mut poll = PollReconciler::default();
        loaded(&mut transport, "a", 120);

        let ended_obs = MediaObservation {
            position: 120.0,
            duration: 120.0,
            paused: true,
            ended: true,
            ready: true,
            ..Default::default()
        };
        let effects = poll.step(&mut transport, ended_obs);
        assert_eq!(
            effects,
            vec![PollEffect::EmitHistory {
                track_id: "a".into(),
                position: 120.0,
                completed: true,
            }]
        );
        assert_eq!(transport.phase(), PlayerPhase::Ended);

        assert!(poll.step(&mut transport, ended_obs).is_empty());
    }
}
