use dioxus::prelude::*;

use crate::api::{format_duration, ApiError, SupabaseClient, TopicWithStats};
use crate::components::app_view::AppView;
use crate::components::audio_manager::PlayerController;
use crate::components::icons::Icon;
use crate::components::navigation::Navigation;
use crate::utils::slugify;

struct HomeData {
    trending: Vec<TopicWithStats>,
    recommended: Vec<TopicWithStats>,
    subjects: Vec<(String, u32)>,
}

#[component]
pub fn HomeView() -> Element {
    let controller = use_context::<PlayerController>();
    let mut refresh = use_signal(|| 0u32);

    let home = use_resource(move || {
        let config = controller.config.read().clone();
        let session = controller.session.read().clone();
        let _ = refresh();
        async move {
            let client = SupabaseClient::with_session(config, session.as_ref());
            let trending = client.get_trending_topics(6).await?;
            let recommended = client.get_recommended_topics(6).await?;
            let subjects = client.get_subject_counts().await?;
            Ok::<_, ApiError>(HomeData {
                trending,
                recommended,
                subjects,
            })
        }
    });

    let body = match &*home.read() {
        None => rsx! {
            div { class: "flex items-center justify-center py-24",
                p { class: "text-sm text-zinc-400", "Loading the catalog..." }
            }
        },
        Some(Err(err)) => rsx! {
            div { class: "flex flex-col items-center gap-3 py-24",
                p { class: "text-sm text-rose-400", "Could not load the catalog: {err}" }
                button {
                    class: "rounded-md bg-zinc-800 px-4 py-2 text-sm text-zinc-200 hover:bg-zinc-700",
                    onclick: move |_| refresh += 1,
                    "Try again"
                }
            }
        },
        Some(Ok(data)) => {
            let trending = data.trending.clone();
            let recommended = data.recommended.clone();
            let subjects = data.subjects.clone();
            rsx! {
                div { class: "space-y-10",
                    section {
                        h2 { class: "pb-4 text-xl font-semibold text-zinc-100", "Trending" }
                        if trending.is_empty() {
                            p { class: "text-sm text-zinc-400", "Nothing here yet." }
                        } else {
                            div { class: "grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-3",
                                for topic in trending {
                                    TopicCard { key: "{topic.id}", topic }
                                }
                            }
                        }
                    }

                    section {
                        h2 { class: "pb-4 text-xl font-semibold text-zinc-100", "Recently Added" }
                        if recommended.is_empty() {
                            p { class: "text-sm text-zinc-400", "Nothing here yet." }
                        } else {
                            div { class: "grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-3",
                                for topic in recommended {
                                    TopicCard { key: "{topic.id}", topic }
                                }
                            }
                        }
                    }

                    section {
                        h2 { class: "pb-4 text-xl font-semibold text-zinc-100", "Browse by Subject" }
                        div { class: "flex flex-wrap gap-3",
                            for (name , count) in subjects {
                                div {
                                    key: "{name}",
                                    id: "subject-{slugify(&name)}",
                                    class: "flex items-center gap-2 rounded-full border border-zinc-700 px-4 py-2 text-sm text-zinc-300",
                                    Icon { name: "book", class: "h-4 w-4 text-indigo-400" }
                                    span { "{name}" }
                                    span { class: "text-xs text-zinc-500", "{count} lectures" }
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    body
}

#[component]
fn TopicCard(topic: TopicWithStats) -> Element {
    let navigation = use_context::<Navigation>();
    let target = topic.clone();

    rsx! {
        button {
            class: "group flex items-center gap-4 rounded-xl border border-zinc-800 bg-zinc-900 p-4 text-left hover:border-zinc-600",
            onclick: move |_| navigation.navigate_to(AppView::TopicDetail(target.clone())),
            if let Some(cover) = topic.cover_image_url.clone() {
                img {
                    class: "h-16 w-16 rounded-lg object-cover",
                    src: "{cover}",
                    alt: "{topic.name}",
                }
            } else {
                div { class: "flex h-16 w-16 items-center justify-center rounded-lg bg-gradient-to-br from-indigo-600 to-violet-700",
                    Icon { name: "book", class: "h-7 w-7 text-white" }
                }
            }
            div { class: "min-w-0 flex-1",
                p { class: "truncate font-medium text-zinc-100 group-hover:text-white", "{topic.name}" }
                p { class: "truncate text-sm text-zinc-400", "{topic.subject_name}" }
                p { class: "pt-1 text-xs text-zinc-500",
                    "{topic.audio_count} lectures \u{00b7} {format_duration(topic.total_duration)} \u{00b7} {topic.total_plays} plays"
                }
            }
        }
    }
}
