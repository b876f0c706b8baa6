// Shared imports, the controller context type, and browser-specific helpers.
use dioxus::prelude::*;

use crate::api::{AudioTrack, AuthSession, SupabaseClient, SupabaseConfig};
use crate::db::PlaybackSpeed;

#[cfg(not(target_arch = "wasm32"))]
use dioxus::document;
#[cfg(not(target_arch = "wasm32"))]
use serde::Deserialize;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

#[cfg(target_arch = "wasm32")]
const AUDIO_ELEMENT_ID: &str = "lectern-audio";

/// Handle to the shared playback state, provided once via context. Copy, so
/// views grab it with `use_context` and call methods directly.
#[derive(Clone, Copy)]
pub struct PlayerController {
    pub transport: Signal<Transport>,
    pub config: Signal<SupabaseConfig>,
    pub session: Signal<Option<AuthSession>>,
}

/// Initialize the global audio element once.
#[cfg(target_arch = "wasm32")]
pub fn get_or_create_audio_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(AUDIO_ELEMENT_ID) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(AUDIO_ELEMENT_ID);
    audio.set_attribute("preload", "metadata").ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

#[cfg(target_arch = "wasm32")]
fn web_media_error_code(audio: &HtmlAudioElement) -> Option<u16> {
    let audio_js = wasm_bindgen::JsValue::from(audio.clone());
    let error_js = js_sys::Reflect::get(&audio_js, &"error".into()).ok()?;
    if error_js.is_null() || error_js.is_undefined() {
        return None;
    }
    let code = js_sys::Reflect::get(&error_js, &"code".into())
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0) as u16;
    Some(code)
}

/// `play()` returns a promise; a rejection usually means the browser blocked
/// autoplay, which downgrades the intent back to paused.
#[cfg(target_arch = "wasm32")]
fn web_try_play(audio: &HtmlAudioElement, mut transport: Signal<Transport>) {
    let epoch = transport.peek().load_epoch();
    if let Ok(promise) = audio.play() {
        spawn(async move {
            if wasm_bindgen_futures::JsFuture::from(promise).await.is_err() {
                transport.write().fail_resume(
                    epoch,
                    "Playback was blocked by the browser. Press play to start.",
                );
            }
        });
    }
}

/// Tear down the media handle before a new source is attached.
#[cfg(target_arch = "wasm32")]
fn release_media_handle(audio: &HtmlAudioElement) {
    let _ = audio.pause();
    audio.set_src("");
    let _ = audio.remove_attribute("src");
    audio.load();
}
