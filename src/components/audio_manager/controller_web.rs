#[cfg(target_arch = "wasm32")]
#[component]
pub fn AudioController() -> Element {
    let controller = use_context::<PlayerController>();
    let mut transport = controller.transport;

    use_effect(move || {
        let Some(_audio) = get_or_create_audio_element() else {
            return;
        };

        spawn(async move {
            let mut poll = PollReconciler::default();

            loop {
                gloo_timers::future::TimeoutFuture::new(200).await;

                let Some(audio) = get_or_create_audio_element() else {
                    continue;
                };

                let duration = audio.duration();
                let obs = MediaObservation {
                    position: audio.current_time(),
                    duration: if duration.is_nan() { 0.0 } else { duration },
                    paused: audio.paused(),
                    ended: audio.ended(),
                    ready: audio.ready_state() >= 3,
                    error_code: web_media_error_code(&audio),
                };

                let effects = {
                    let mut transport = transport.write();
                    poll.step(&mut transport, obs)
                };

                for effect in effects {
                    match effect {
                        PollEffect::BumpPlayCount { track_id } => {
                            spawn_play_count_bump(controller, track_id);
                        }
                        PollEffect::EmitHistory {
                            track_id,
                            position,
                            completed,
                        } => {
                            spawn_history_emit(controller, track_id, position, completed);
                        }
                        PollEffect::StartPlayback => {
                            web_try_play(&audio, transport);
                        }
                    }
                }
            }
        });
    });

    rsx! {}
}
