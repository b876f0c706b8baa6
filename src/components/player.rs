use dioxus::prelude::*;

use crate::api::format_duration;
use crate::components::audio_manager::{PlayerController, PlayerPhase};
use crate::components::icons::Icon;

/// Persistent playback bar pinned to the bottom of the shell. Renders nothing
/// until a track has been requested at least once.
#[component]
pub fn Player() -> Element {
    let mut controller = use_context::<PlayerController>();
    let transport = controller.transport.read();

    let Some(track) = transport.track().cloned() else {
        return rsx! {};
    };

    let phase = transport.phase();
    let position = transport.position();
    let duration = transport.duration();
    let volume = transport.volume();
    let speed_label = transport.speed().label();
    let last_error = transport.last_error().map(str::to_owned);
    drop(transport);

    let play_icon = match phase {
        PlayerPhase::Playing | PlayerPhase::Loading => "pause",
        _ => "play",
    };
    let seek_max = if duration > 0.0 { duration } else { 1.0 };
    let volume_percent = (volume * 100.0).round() as u32;

    rsx! {
        div { class: "fixed bottom-0 left-0 right-0 z-30 border-t border-zinc-800 bg-zinc-900/95 px-4 py-3 backdrop-blur md:left-64",
            if let Some(message) = last_error {
                p { class: "pb-1 text-xs text-rose-400", "{message}" }
            }
            div { class: "flex items-center gap-4",
                div { class: "min-w-0 flex-1 md:flex-none md:w-56",
                    p { class: "truncate text-sm font-medium text-zinc-100", "{track.title}" }
                    p { class: "truncate text-xs text-zinc-400", "{track.subject}" }
                }

                div { class: "flex items-center gap-2",
                    button {
                        class: "rounded-full p-2 text-zinc-300 hover:bg-zinc-800 hover:text-white",
                        onclick: move |_| controller.skip_backward(),
                        Icon { name: "skip-back", class: "h-5 w-5" }
                    }
                    button {
                        class: "rounded-full bg-indigo-600 p-3 text-white hover:bg-indigo-500 disabled:opacity-50",
                        disabled: phase == PlayerPhase::Loading,
                        onclick: move |_| controller.toggle_play_pause(),
                        Icon { name: play_icon, class: "h-5 w-5" }
                    }
                    button {
                        class: "rounded-full p-2 text-zinc-300 hover:bg-zinc-800 hover:text-white",
                        onclick: move |_| controller.skip_forward(),
                        Icon { name: "skip-forward", class: "h-5 w-5" }
                    }
                }

                div { class: "hidden flex-1 items-center gap-2 md:flex",
                    span { class: "w-10 text-right text-xs tabular-nums text-zinc-400",
                        "{format_duration(position as u32)}"
                    }
                    input {
                        class: "h-1 flex-1 cursor-pointer accent-indigo-500",
                        r#type: "range",
                        min: "0",
                        max: "{seek_max}",
                        step: "1",
                        value: "{position}",
                        oninput: move |event| {
                            if let Ok(target) = event.value().parse::<f64>() {
                                controller.seek_to(target);
                            }
                        },
                    }
                    span { class: "w-10 text-xs tabular-nums text-zinc-400",
                        "{format_duration(duration as u32)}"
                    }
                }

                button {
                    class: "w-12 rounded-md border border-zinc-700 px-2 py-1 text-xs font-medium text-zinc-300 hover:border-zinc-500 hover:text-white",
                    onclick: move |_| {
                        controller.cycle_playback_speed();
                    },
                    "{speed_label}"
                }

                div { class: "hidden items-center gap-2 lg:flex",
                    Icon { name: "volume", class: "h-4 w-4 text-zinc-400" }
                    input {
                        class: "h-1 w-24 cursor-pointer accent-indigo-500",
                        r#type: "range",
                        min: "0",
                        max: "100",
                        step: "1",
                        value: "{volume_percent}",
                        oninput: move |event| {
                            if let Ok(percent) = event.value().parse::<f64>() {
                                controller.set_volume(percent / 100.0);
                            }
                        },
                    }
                }
            }
        }
    }
}
