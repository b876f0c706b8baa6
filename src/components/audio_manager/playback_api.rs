// Public playback API consumed by UI components. Every operation updates the
// transport first, then mirrors the outcome onto the platform media handle.
impl PlayerController {
    pub fn play_track(&mut self, track: AudioTrack) {
        let decision = self.transport.write().begin_load(track);
        match decision {
            LoadDecision::Rejected => {}
            LoadDecision::Resume => self.platform_resume(),
            LoadDecision::Load {
                url,
                release_previous,
                ..
            } => self.platform_load(&url, release_previous),
        }
    }

    pub fn pause(&mut self) {
        self.transport.write().pause();
        self.platform_pause();
    }

    pub fn resume(&mut self) {
        if self.transport.peek().phase() == PlayerPhase::Paused {
            self.transport.write().resume();
            self.platform_resume();
        }
    }

    pub fn toggle_play_pause(&mut self) {
        let phase = self.transport.peek().phase();
        match phase {
            PlayerPhase::Playing => self.pause(),
            PlayerPhase::Paused => self.resume(),
            // A finished track restarts from the top.
            PlayerPhase::Ended => {
                let track = self.transport.peek().track().cloned();
                if let Some(track) = track {
                    self.play_track(track);
                }
            }
            _ => {}
        }
    }

    pub fn seek_to(&mut self, position: f64) {
        let clamped = self.transport.write().seek_to(position);
        if let Some(clamped) = clamped {
            self.platform_seek(clamped);
        }
    }

    pub fn skip_forward(&mut self) {
        let clamped = self.transport.write().skip_forward();
        if let Some(clamped) = clamped {
            self.platform_seek(clamped);
        }
    }

    pub fn skip_backward(&mut self) {
        let clamped = self.transport.write().skip_backward();
        if let Some(clamped) = clamped {
            self.platform_seek(clamped);
        }
    }

    pub fn set_volume(&mut self, volume: f64) {
        let normalized = self.transport.write().set_volume(volume);
        self.platform_set_volume(normalized);
    }

    pub fn set_playback_speed(&mut self, speed: PlaybackSpeed) {
        self.transport.write().set_speed(speed);
        self.platform_set_rate(speed.as_f64());
    }

    pub fn cycle_playback_speed(&mut self) -> PlaybackSpeed {
        let speed = self.transport.write().cycle_speed();
        self.platform_set_rate(speed.as_f64());
        speed
    }

    #[cfg(target_arch = "wasm32")]
    fn platform_load(&self, url: &str, release_previous: bool) {
        let Some(audio) = get_or_create_audio_element() else {
            return;
        };
        if release_previous {
            release_media_handle(&audio);
        }
        let (volume, rate) = {
            let transport = self.transport.peek();
            (transport.volume(), transport.speed().as_f64())
        };
        audio.set_src(url);
        audio.set_volume(volume);
        audio.set_playback_rate(rate);
        web_try_play(&audio, self.transport);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn platform_load(&self, url: &str, release_previous: bool) {
        if release_previous {
            native_audio_command(serde_json::json!({ "type": "clear" }));
        }
        let (volume, rate) = {
            let transport = self.transport.peek();
            (transport.volume(), transport.speed().as_f64())
        };
        native_audio_command(serde_json::json!({
            "type": "load",
            "src": url,
            "volume": volume,
            "rate": rate,
        }));
    }

    #[cfg(target_arch = "wasm32")]
    fn platform_resume(&self) {
        if let Some(audio) = get_or_create_audio_element() {
            if audio.paused() {
                web_try_play(&audio, self.transport);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn platform_resume(&self) {
        native_audio_command(serde_json::json!({ "type": "play" }));
    }

    #[cfg(target_arch = "wasm32")]
    fn platform_pause(&self) {
        if let Some(audio) = get_or_create_audio_element() {
            let _ = audio.pause();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn platform_pause(&self) {
        native_audio_command(serde_json::json!({ "type": "pause" }));
    }

    #[cfg(target_arch = "wasm32")]
    fn platform_seek(&self, position: f64) {
        if let Some(audio) = get_or_create_audio_element() {
            audio.set_current_time(position);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn platform_seek(&self, position: f64) {
        native_audio_command(serde_json::json!({
            "type": "seek",
            "position": position.max(0.0),
        }));
    }

    #[cfg(target_arch = "wasm32")]
    fn platform_set_volume(&self, volume: f64) {
        if let Some(audio) = get_or_create_audio_element() {
            audio.set_volume(volume);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn platform_set_volume(&self, volume: f64) {
        native_audio_command(serde_json::json!({
            "type": "volume",
            "value": volume,
        }));
    }

    #[cfg(target_arch = "wasm32")]
    fn platform_set_rate(&self, rate: f64) {
        if let Some(audio) = get_or_create_audio_element() {
            audio.set_playback_rate(rate);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn platform_set_rate(&self, rate: f64) {
        native_audio_command(serde_json::json!({
            "type": "rate",
            "value": rate,
        }));
    }
}

/// Fire-and-forget play count bump, triggered exactly once per successful
/// load by the poll reconciler.
fn spawn_play_count_bump(controller: PlayerController, track_id: String) {
    let config = controller.config.peek().clone();
    let session = controller.session.peek().clone();
    spawn(async move {
        let client = SupabaseClient::with_session(config, session.as_ref());
        if let Err(err) = client.increment_play_count(&track_id).await {
            tracing::debug!(%track_id, "play count bump failed: {err}");
        }
    });
}

/// Background listening-history write. Signed-out listeners emit nothing.
fn spawn_history_emit(controller: PlayerController, track_id: String, position: f64, completed: bool) {
    let Some(user_id) = controller
        .session
        .peek()
        .as_ref()
        .map(|s| s.user.id.clone())
    else {
        return;
    };
    let config = controller.config.peek().clone();
    let session = controller.session.peek().clone();
    spawn(async move {
        let client = SupabaseClient::with_session(config, session.as_ref());
        if let Err(err) = client
            .record_listening_progress(&user_id, &track_id, position, completed)
            .await
        {
            tracing::debug!(%track_id, "listening history write failed: {err}");
        }
    });
}
