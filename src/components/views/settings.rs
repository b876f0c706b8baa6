use dioxus::prelude::*;

use crate::components::audio_manager::PlayerController;
use crate::components::icons::Icon;
use crate::db::PlaybackSpeed;

const SPEEDS: [PlaybackSpeed; 4] = [
    PlaybackSpeed::Normal,
    PlaybackSpeed::Faster,
    PlaybackSpeed::Fast,
    PlaybackSpeed::Double,
];

#[component]
pub fn SettingsView() -> Element {
    let mut controller = use_context::<PlayerController>();

    let (volume, speed) = {
        let transport = controller.transport.read();
        (transport.volume(), transport.speed())
    };
    let volume_percent = (volume * 100.0).round() as u32;

    let backend_url = controller.config.read().url.clone();
    let signed_in = controller.session.read().is_some();
    let version = env!("CARGO_PKG_VERSION");

    rsx! {
        div { class: "max-w-xl space-y-8",
            h2 { class: "text-xl font-semibold text-zinc-100", "Settings" }

            section { class: "rounded-xl border border-zinc-800 bg-zinc-900 p-5",
                h3 { class: "pb-4 text-sm font-semibold uppercase tracking-wide text-zinc-400",
                    "Playback"
                }

                div { class: "pb-6",
                    div { class: "flex items-center justify-between pb-2",
                        label { class: "text-sm text-zinc-200", "Volume" }
                        span { class: "text-xs tabular-nums text-zinc-500", "{volume_percent}%" }
                    }
                    div { class: "flex items-center gap-3",
                        Icon { name: "volume", class: "h-4 w-4 text-zinc-400" }
                        input {
                            class: "h-1 flex-1 cursor-pointer accent-indigo-500",
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

                div {
                    label { class: "block pb-2 text-sm text-zinc-200", "Playback speed" }
                    div { class: "flex gap-2",
                        for option in SPEEDS {
                            button {
                                key: "{option.label()}",
                                class: if option == speed { "rounded-md bg-indigo-600 px-3 py-1.5 text-sm font-medium text-white" } else { "rounded-md border border-zinc-700 px-3 py-1.5 text-sm text-zinc-300 hover:border-zinc-500" },
                                onclick: move |_| controller.set_playback_speed(option),
                                "{option.label()}"
                            }
                        }
                    }
                }
            }

            section { class: "rounded-xl border border-zinc-800 bg-zinc-900 p-5",
                h3 { class: "pb-4 text-sm font-semibold uppercase tracking-wide text-zinc-400",
                    "Backend"
                }
                div { class: "space-y-2 text-sm",
                    div { class: "flex justify-between",
                        span { class: "text-zinc-400", "Service URL" }
                        span { class: "truncate pl-4 text-zinc-200", "{backend_url}" }
                    }
                    div { class: "flex justify-between",
                        span { class: "text-zinc-400", "Account" }
                        span { class: "text-zinc-200",
                            if signed_in {
                                "Signed in"
                            } else {
                                "Signed out"
                            }
                        }
                    }
                }
            }

            section { class: "rounded-xl border border-zinc-800 bg-zinc-900 p-5",
                h3 { class: "pb-4 text-sm font-semibold uppercase tracking-wide text-zinc-400",
                    "About"
                }
                p { class: "text-sm text-zinc-400",
                    "Lectern {version} \u{2014} audio lectures, anywhere."
                }
            }
        }
    }
}
