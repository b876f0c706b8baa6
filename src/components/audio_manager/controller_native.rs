#[cfg(not(target_arch = "wasm32"))]
#[component]
pub fn AudioController() -> Element {
    let controller = use_context::<PlayerController>();
    let mut transport = controller.transport;

    use_effect(move || {
        ensure_native_audio_bridge();

        spawn(async move {
            let mut poll = PollReconciler::default();

            loop {
                native_delay_ms(250).await;

                let Some(snapshot) = native_audio_snapshot().await else {
                    continue;
                };

                let effects = {
                    let mut transport = transport.write();
                    poll.step(&mut transport, snapshot.observation())
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
                            native_audio_command(serde_json::json!({ "type": "play" }));
                        }
                    }
                }
            }
        });
    });

    rsx! {}
}
