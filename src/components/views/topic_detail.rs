use dioxus::prelude::*;

use crate::api::{format_duration, ApiError, AudioTrack, SupabaseClient, TopicWithStats};
use crate::components::audio_manager::{PlayerController, PlayerPhase};
use crate::components::icons::Icon;
use crate::components::toast::Toasts;

#[component]
pub fn TopicDetailView(topic: TopicWithStats) -> Element {
    let controller = use_context::<PlayerController>();
    let topic_id = topic.id.clone();

    let audios = use_resource(move || {
        let config = controller.config.read().clone();
        let session = controller.session.read().clone();
        let topic_id = topic_id.clone();
        async move {
            let client = SupabaseClient::with_session(config, session.as_ref());
            client.get_topic_audios(&topic_id).await
        }
    });

    rsx! {
        div { class: "space-y-8",
            header { class: "flex items-center gap-5",
                if let Some(cover) = topic.cover_image_url.clone() {
                    img {
                        class: "h-24 w-24 rounded-xl object-cover",
                        src: "{cover}",
                        alt: "{topic.name}",
                    }
                } else {
                    div { class: "flex h-24 w-24 items-center justify-center rounded-xl bg-gradient-to-br from-indigo-600 to-violet-700",
                        Icon { name: "book", class: "h-10 w-10 text-white" }
                    }
                }
                div { class: "min-w-0",
                    h2 { class: "text-2xl font-semibold text-zinc-100", "{topic.name}" }
                    p { class: "text-sm text-zinc-400",
                        if topic.chapter_name.is_empty() {
                            "{topic.subject_name}"
                        } else {
                            "{topic.subject_name} \u{00b7} {topic.chapter_name}"
                        }
                    }
                    p { class: "pt-1 text-xs text-zinc-500",
                        "{topic.audio_count} lectures \u{00b7} {format_duration(topic.total_duration)} total"
                    }
                }
            }

            if let Some(description) = topic.description.clone() {
                p { class: "max-w-2xl text-sm leading-relaxed text-zinc-400", "{description}" }
            }

            match &*audios.read() {
                None => rsx! {
                    p { class: "py-12 text-center text-sm text-zinc-400", "Loading lectures..." }
                },
                Some(Err(err)) => rsx! {
                    p { class: "py-12 text-center text-sm text-rose-400",
                        "Could not load lectures: {err}"
                    }
                },
                Some(Ok(tracks)) => {
                    let tracks = tracks.clone();
                    rsx! {
                        if tracks.is_empty() {
                            p { class: "py-12 text-center text-sm text-zinc-400",
                                "No lectures in this topic yet."
                            }
                        } else {
                            div { class: "divide-y divide-zinc-800 rounded-xl border border-zinc-800 bg-zinc-900",
                                for (index , track) in tracks.into_iter().enumerate() {
                                    TrackRow { key: "{track.id}", index, track }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TrackRow(index: usize, track: AudioTrack) -> Element {
    let mut controller = use_context::<PlayerController>();
    let toasts = use_context::<Toasts>();

    let (is_current, phase) = {
        let transport = controller.transport.read();
        let is_current = transport
            .track()
            .map(|current| current.id == track.id)
            .unwrap_or(false);
        (is_current, transport.phase())
    };
    let is_playing = is_current && matches!(phase, PlayerPhase::Playing | PlayerPhase::Loading);

    let play_track = track.clone();
    let bookmark_track_id = track.id.clone();
    let download_track = track.clone();

    rsx! {
        div { class: "flex items-center gap-4 px-4 py-3",
            span { class: "w-6 text-right text-sm tabular-nums text-zinc-500", "{index + 1}" }
            button {
                class: if is_current { "rounded-full bg-indigo-600 p-2 text-white hover:bg-indigo-500" } else { "rounded-full bg-zinc-800 p-2 text-zinc-300 hover:bg-zinc-700 hover:text-white" },
                onclick: move |_| {
                    if is_playing {
                        controller.pause();
                    } else {
                        controller.play_track(play_track.clone());
                    }
                },
                Icon {
                    name: if is_playing { "pause" } else { "play" },
                    class: "h-4 w-4",
                }
            }
            div { class: "min-w-0 flex-1",
                p {
                    class: if is_current { "truncate text-sm font-medium text-indigo-400" } else { "truncate text-sm font-medium text-zinc-100" },
                    "{track.title}"
                }
                p { class: "text-xs text-zinc-500",
                    "{format_duration(track.duration)} \u{00b7} {track.play_count} plays"
                }
            }
            if track.is_premium {
                span { class: "rounded-full bg-amber-500/10 px-2 py-0.5 text-xs font-medium text-amber-400",
                    "Premium"
                }
            }
            button {
                class: "rounded-md p-2 text-zinc-400 hover:bg-zinc-800 hover:text-white",
                title: "Bookmark",
                onclick: move |_| {
                    let Some(user_id) = controller
                        .session
                        .peek()
                        .as_ref()
                        .map(|s| s.user.id.clone()) else {
                        toasts.info("Sign in to bookmark lectures.");
                        return;
                    };
                    let config = controller.config.peek().clone();
                    let session = controller.session.peek().clone();
                    let audio_id = bookmark_track_id.clone();
                    spawn(async move {
                        let client = SupabaseClient::with_session(config, session.as_ref());
                        match client.add_bookmark(&user_id, &audio_id).await {
                            Ok(()) => toasts.success("Bookmarked."),
                            Err(ApiError::Unauthorized) => {
                                toasts.error("Your session expired. Sign in again.")
                            }
                            Err(err) => toasts.error(format!("Bookmark failed: {err}")),
                        }
                    });
                },
                Icon { name: "bookmark", class: "h-4 w-4" }
            }
            button {
                class: "rounded-md p-2 text-zinc-400 hover:bg-zinc-800 hover:text-white",
                title: "Save for offline",
                onclick: move |_| {
                    let Some(user_id) = controller
                        .session
                        .peek()
                        .as_ref()
                        .map(|s| s.user.id.clone()) else {
                        toasts.info("Sign in to save lectures offline.");
                        return;
                    };
                    let config = controller.config.peek().clone();
                    let session = controller.session.peek().clone();
                    let audio_id = download_track.id.clone();
                    let file_size = download_track.size.unwrap_or_default();
                    spawn(async move {
                        let client = SupabaseClient::with_session(config, session.as_ref());
                        match client.add_download(&user_id, &audio_id, file_size).await {
                            Ok(()) => toasts.success("Saved to downloads."),
                            Err(ApiError::Unauthorized) => {
                                toasts.error("Your session expired. Sign in again.")
                            }
                            Err(err) => toasts.error(format!("Download failed: {err}")),
                        }
                    });
                },
                Icon { name: "download", class: "h-4 w-4" }
            }
        }
    }
}
