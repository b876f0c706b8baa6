// Desktop/mobile webview JavaScript bridge. The webview hosts the real
// `<audio>` element; Rust talks to it with JSON commands and polls typed
// snapshots back out.
#[cfg(not(target_arch = "wasm32"))]
const NATIVE_AUDIO_BOOTSTRAP_JS: &str = r#"
(() => {
  if (window.__lecternAudioBridge) {
    return true;
  }

  const existing = document.getElementById("lectern-audio-native");
  const audio = existing || document.createElement("audio");
  if (!existing) {
    audio.id = "lectern-audio-native";
    audio.preload = "metadata";
    audio.style.display = "none";
    audio.setAttribute("playsinline", "true");
    audio.setAttribute("webkit-playsinline", "true");
    document.body.appendChild(audio);
  }

  const safePlay = async () => {
    try {
      await audio.play();
    } catch (_err) {}
  };

  let lastErrorCode = 0;
  audio.addEventListener("error", () => {
    lastErrorCode = (audio.error && audio.error.code) || 0;
  });

  const bridge = {
    audio,
    apply(cmd) {
      if (!cmd || !cmd.type) return;

      switch (cmd.type) {
        case "load":
          lastErrorCode = 0;
          if (cmd.src && audio.src !== cmd.src) {
            audio.src = cmd.src;
          }
          if (typeof cmd.volume === "number") {
            audio.volume = Math.max(0, Math.min(1, cmd.volume));
          }
          if (typeof cmd.rate === "number" && cmd.rate > 0) {
            audio.playbackRate = cmd.rate;
          }
          safePlay();
          break;
        case "play":
          safePlay();
          break;
        case "pause":
          audio.pause();
          break;
        case "seek":
          if (typeof cmd.position === "number" && Number.isFinite(cmd.position)) {
            try {
              audio.currentTime = Math.max(0, cmd.position);
            } catch (_err) {}
          }
          break;
        case "volume":
          if (typeof cmd.value === "number") {
            audio.volume = Math.max(0, Math.min(1, cmd.value));
          }
          break;
        case "rate":
          if (typeof cmd.value === "number" && cmd.value > 0) {
            audio.playbackRate = cmd.value;
          }
          break;
        case "clear":
          audio.pause();
          audio.removeAttribute("src");
          audio.load();
          lastErrorCode = 0;
          break;
      }
    },
    snapshot() {
      // HAVE_FUTURE_DATA and up means playback can proceed.
      const ready = audio.readyState >= 3;
      return {
        current_time: Number.isFinite(audio.currentTime) ? audio.currentTime : 0,
        duration: Number.isFinite(audio.duration) ? audio.duration : 0,
        paused: !!audio.paused,
        ended: !!audio.ended,
        ready,
        error_code: lastErrorCode,
      };
    },
  };

  window.__lecternAudioBridge = bridge;
  return true;
})();
"#;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct NativeAudioSnapshot {
    current_time: f64,
    duration: f64,
    paused: bool,
    ended: bool,
    ready: bool,
    error_code: u16,
}

#[cfg(not(target_arch = "wasm32"))]
impl NativeAudioSnapshot {
    fn observation(self) -> MediaObservation {
        MediaObservation {
            position: self.current_time,
            duration: self.duration,
            paused: self.paused,
            ended: self.ended,
            ready: self.ready,
            error_code: (self.error_code > 0).then_some(self.error_code),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn ensure_native_audio_bridge() {
    let _ = document::eval(NATIVE_AUDIO_BOOTSTRAP_JS);
}

#[cfg(not(target_arch = "wasm32"))]
fn native_audio_command(value: serde_json::Value) {
    ensure_native_audio_bridge();
    let payload = serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string());
    let script = format!(
        r#"(function () {{
            const bridge = window.__lecternAudioBridge;
            if (!bridge) return false;
            bridge.apply({payload});
            return true;
        }})();"#
    );
    let _ = document::eval(&script);
}

#[cfg(not(target_arch = "wasm32"))]
async fn native_audio_snapshot() -> Option<NativeAudioSnapshot> {
    ensure_native_audio_bridge();
    let eval = document::eval(
        r#"return (function () {
            const bridge = window.__lecternAudioBridge;
            const raw = (bridge && typeof bridge.snapshot === "function")
              ? (bridge.snapshot() || {})
              : {};
            return {
              current_time: Number.isFinite(raw.current_time) ? raw.current_time : 0,
              duration: Number.isFinite(raw.duration) ? raw.duration : 0,
              paused: !!raw.paused,
              ended: !!raw.ended,
              ready: !!raw.ready,
              error_code: Number.isFinite(raw.error_code) ? raw.error_code : 0,
            };
        })();"#,
    );
    eval.join::<NativeAudioSnapshot>().await.ok()
}

#[cfg(not(target_arch = "wasm32"))]
async fn native_delay_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}
