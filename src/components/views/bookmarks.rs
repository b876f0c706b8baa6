use dioxus::prelude::*;

use crate::api::{format_duration, ApiError, BookmarkedAudio, SupabaseClient};
use crate::components::app_view::AppView;
use crate::components::audio_manager::PlayerController;
use crate::components::icons::Icon;
use crate::components::navigation::Navigation;
use crate::components::toast::Toasts;

#[component]
pub fn BookmarksView() -> Element {
    let controller = use_context::<PlayerController>();
    let navigation = use_context::<Navigation>();
    let mut refresh = use_signal(|| 0u32);

    let bookmarks = use_resource(move || {
        let config = controller.config.read().clone();
        let session = controller.session.read().clone();
        let _ = refresh();
        async move {
            let Some(user_id) = session.as_ref().map(|s| s.user.id.clone()) else {
                return Ok(Vec::new());
            };
            let client = SupabaseClient::with_session(config, session.as_ref());
            client.get_user_bookmarks(&user_id).await
        }
    });

    let signed_in = controller.session.read().is_some();
    if !signed_in {
        return rsx! {
            div { class: "flex flex-col items-center gap-4 py-24",
                Icon { name: "bookmark", class: "h-10 w-10 text-zinc-600" }
                p { class: "text-sm text-zinc-400", "Sign in to see your bookmarked lectures." }
                button {
                    class: "rounded-md bg-indigo-600 px-4 py-2 text-sm font-medium text-white hover:bg-indigo-500",
                    onclick: move |_| navigation.navigate_to(AppView::Auth),
                    "Sign In"
                }
            }
        };
    }

    rsx! {
        div { class: "space-y-6",
            h2 { class: "text-xl font-semibold text-zinc-100", "Bookmarks" }
            match &*bookmarks.read() {
                None => rsx! {
                    p { class: "py-12 text-center text-sm text-zinc-400", "Loading bookmarks..." }
                },
                Some(Err(err)) => rsx! {
                    div { class: "flex flex-col items-center gap-3 py-12",
                        p { class: "text-sm text-rose-400", "Could not load bookmarks: {err}" }
                        button {
                            class: "rounded-md bg-zinc-800 px-4 py-2 text-sm text-zinc-200 hover:bg-zinc-700",
                            onclick: move |_| refresh += 1,
                            "Try again"
                        }
                    }
                },
                Some(Ok(rows)) => {
                    let rows = rows.clone();
                    rsx! {
                        if rows.is_empty() {
                            div { class: "flex flex-col items-center gap-3 py-16",
                                Icon { name: "bookmark", class: "h-10 w-10 text-zinc-600" }
                                p { class: "text-sm text-zinc-400",
                                    "Nothing bookmarked yet. Save lectures from any topic."
                                }
                            }
                        } else {
                            div { class: "divide-y divide-zinc-800 rounded-xl border border-zinc-800 bg-zinc-900",
                                for row in rows {
                                    BookmarkRow { key: "{row.id}", row, refresh }
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
fn BookmarkRow(row: BookmarkedAudio, refresh: Signal<u32>) -> Element {
    let mut controller = use_context::<PlayerController>();
    let toasts = use_context::<Toasts>();

    let Some(track) = row.audio.clone() else {
        // Join rows can outlive their track when a lecture is unpublished.
        return rsx! {};
    };

    let play_track = track.clone();
    let remove_id = row.audio_id.clone().unwrap_or_else(|| track.id.clone());

    rsx! {
        div { class: "flex items-center gap-4 px-4 py-3",
            button {
                class: "rounded-full bg-zinc-800 p-2 text-zinc-300 hover:bg-zinc-700 hover:text-white",
                onclick: move |_| controller.play_track(play_track.clone()),
                Icon { name: "play", class: "h-4 w-4" }
            }
            div { class: "min-w-0 flex-1",
                p { class: "truncate text-sm font-medium text-zinc-100", "{track.title}" }
                p { class: "text-xs text-zinc-500",
                    "{track.subject} \u{00b7} {format_duration(track.duration)}"
                }
            }
            button {
                class: "rounded-md p-2 text-zinc-400 hover:bg-zinc-800 hover:text-rose-400",
                title: "Remove bookmark",
                onclick: move |_| {
                    let Some(user_id) = controller
                        .session
                        .peek()
                        .as_ref()
                        .map(|s| s.user.id.clone()) else {
                        return;
                    };
                    let config = controller.config.peek().clone();
                    let session = controller.session.peek().clone();
                    let audio_id = remove_id.clone();
                    let mut refresh = refresh;
                    spawn(async move {
                        let client = SupabaseClient::with_session(config, session.as_ref());
                        match client.remove_bookmark(&user_id, &audio_id).await {
                            Ok(()) => refresh += 1,
                            Err(ApiError::Unauthorized) => {
                                toasts.error("Your session expired. Sign in again.")
                            }
                            Err(err) => toasts.error(format!("Remove failed: {err}")),
                        }
                    });
                },
                Icon { name: "trash", class: "h-4 w-4" }
            }
        }
    }
}
