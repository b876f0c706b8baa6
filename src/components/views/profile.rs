use dioxus::prelude::*;

use crate::api::{format_duration, ActivityKind, RecentActivity, SupabaseClient};
use crate::components::app_view::AppView;
use crate::components::audio_manager::PlayerController;
use crate::components::icons::Icon;
use crate::components::navigation::Navigation;
use crate::components::toast::Toasts;

fn format_listening_time(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[component]
pub fn ProfileView() -> Element {
    let controller = use_context::<PlayerController>();
    let navigation = use_context::<Navigation>();
    let toasts = use_context::<Toasts>();

    let stats = use_resource(move || {
        let config = controller.config.read().clone();
        let session = controller.session.read().clone();
        async move {
            let Some(user_id) = session.as_ref().map(|s| s.user.id.clone()) else {
                return Ok(Default::default());
            };
            let client = SupabaseClient::with_session(config, session.as_ref());
            client.get_profile_stats(&user_id).await
        }
    });

    let session = controller.session.read().clone();
    let Some(active_session) = session else {
        return rsx! {
            div { class: "flex flex-col items-center gap-4 py-24",
                Icon { name: "user", class: "h-10 w-10 text-zinc-600" }
                p { class: "text-sm text-zinc-400", "Sign in to track your listening progress." }
                button {
                    class: "rounded-md bg-indigo-600 px-4 py-2 text-sm font-medium text-white hover:bg-indigo-500",
                    onclick: move |_| navigation.navigate_to(AppView::Auth),
                    "Sign In"
                }
            }
        };
    };

    let email = active_session
        .user
        .email
        .clone()
        .unwrap_or_else(|| "Learner".to_string());

    rsx! {
        div { class: "space-y-8",
            header { class: "flex items-center justify-between",
                div { class: "flex items-center gap-4",
                    div { class: "flex h-14 w-14 items-center justify-center rounded-full bg-indigo-600",
                        Icon { name: "user", class: "h-7 w-7 text-white" }
                    }
                    div {
                        h2 { class: "text-xl font-semibold text-zinc-100", "{email}" }
                        p { class: "text-sm text-zinc-400", "Your listening stats" }
                    }
                }
                button {
                    class: "flex items-center gap-2 rounded-md border border-zinc-700 px-3 py-2 text-sm text-zinc-300 hover:border-zinc-500 hover:text-white",
                    onclick: move |_| {
                        let config = controller.config.peek().clone();
                        let session = controller.session.peek().clone();
                        let mut session_signal = controller.session;
                        spawn(async move {
                            let client = SupabaseClient::with_session(config, session.as_ref());
                            if let Err(err) = client.sign_out().await {
                                tracing::debug!("sign-out request failed: {err}");
                            }
                            session_signal.set(None);
                            navigation.navigate_to(AppView::Home);
                            toasts.info("Signed out.");
                        });
                    },
                    Icon { name: "log-out", class: "h-4 w-4" }
                    span { "Sign Out" }
                }
            }

            match &*stats.read() {
                None => rsx! {
                    p { class: "py-12 text-center text-sm text-zinc-400", "Loading your stats..." }
                },
                Some(Err(err)) => rsx! {
                    p { class: "py-12 text-center text-sm text-rose-400",
                        "Could not load your stats: {err}"
                    }
                },
                Some(Ok(stats)) => {
                    let stats = stats.clone();
                    rsx! {
                        div { class: "grid grid-cols-2 gap-4 lg:grid-cols-4",
                            StatCard {
                                icon: "clock",
                                label: "Listening time",
                                value: format_listening_time(stats.total_listening_time),
                            }
                            StatCard {
                                icon: "book",
                                label: "Completed",
                                value: format!("{}", stats.total_audios_completed),
                            }
                            StatCard {
                                icon: "flame",
                                label: "Day streak",
                                value: format!("{}", stats.listening_streak),
                            }
                            StatCard {
                                icon: "clock",
                                label: "Last listened",
                                value: if stats.last_listening_date.is_empty() { "\u{2014}".to_string() } else { stats.last_listening_date.clone() },
                            }
                        }

                        section {
                            h3 { class: "pb-3 text-lg font-semibold text-zinc-100", "Subject Progress" }
                            if stats.subject_progress.is_empty() {
                                p { class: "text-sm text-zinc-400", "Start listening to build up progress." }
                            } else {
                                div { class: "space-y-3",
                                    for subject in stats.subject_progress.clone() {
                                        div {
                                            key: "{subject.subject}",
                                            class: "rounded-lg border border-zinc-800 bg-zinc-900 p-4",
                                            div { class: "flex items-center justify-between pb-2",
                                                span { class: "text-sm font-medium text-zinc-200",
                                                    "{subject.subject}"
                                                }
                                                span { class: "text-xs text-zinc-500",
                                                    "{subject.completed}/{subject.total} \u{00b7} {subject.progress}%"
                                                }
                                            }
                                            div { class: "h-2 overflow-hidden rounded-full bg-zinc-800",
                                                div {
                                                    class: "h-full rounded-full bg-indigo-500",
                                                    style: "width: {subject.progress}%",
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }

                        section {
                            h3 { class: "pb-3 text-lg font-semibold text-zinc-100", "Recent Activity" }
                            if stats.recent_activity.is_empty() {
                                p { class: "text-sm text-zinc-400", "No activity yet." }
                            } else {
                                div { class: "divide-y divide-zinc-800 rounded-xl border border-zinc-800 bg-zinc-900",
                                    for activity in stats.recent_activity.clone() {
                                        ActivityRow { key: "{activity.id}", activity }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// One history entry. Unfinished lectures can be picked back up from here.
#[component]
fn ActivityRow(activity: RecentActivity) -> Element {
    let controller = use_context::<PlayerController>();
    let toasts = use_context::<Toasts>();

    let completed = matches!(activity.kind, ActivityKind::Completed);
    let status = if completed {
        "Completed".to_string()
    } else if activity.duration_seconds > 0 {
        format!(
            "{} of {}",
            format_duration(activity.position_seconds as u32),
            format_duration(activity.duration_seconds)
        )
    } else {
        "Started".to_string()
    };
    let resume_id = activity.audio_id.clone();

    rsx! {
        button {
            class: "flex w-full items-center gap-3 px-4 py-3 text-left hover:bg-zinc-800/60 disabled:cursor-default disabled:hover:bg-transparent",
            disabled: resume_id.is_none(),
            onclick: move |_| {
                let Some(audio_id) = resume_id.clone() else {
                    return;
                };
                let mut controller = controller;
                let config = controller.config.peek().clone();
                let session = controller.session.peek().clone();
                spawn(async move {
                    let client = SupabaseClient::with_session(config, session.as_ref());
                    match client.get_audio(&audio_id).await {
                        Ok(track) => controller.play_track(track),
                        Err(err) => toasts.error(format!("Could not load that lecture: {err}")),
                    }
                });
            },
            Icon {
                name: if completed { "book" } else { "play" },
                class: if completed { "h-4 w-4 text-emerald-400" } else { "h-4 w-4 text-indigo-400" },
            }
            div { class: "min-w-0 flex-1",
                p { class: "truncate text-sm text-zinc-200", "{activity.title}" }
                p { class: "text-xs text-zinc-500", "{activity.subject}" }
            }
            span { class: "text-xs text-zinc-500", "{status}" }
        }
    }
}

#[component]
fn StatCard(icon: String, label: String, value: String) -> Element {
    rsx! {
        div { class: "rounded-xl border border-zinc-800 bg-zinc-900 p-4",
            div { class: "flex items-center gap-2 pb-2",
                Icon { name: icon.clone(), class: "h-4 w-4 text-indigo-400" }
                span { class: "text-xs uppercase tracking-wide text-zinc-500", "{label}" }
            }
            p { class: "text-2xl font-semibold text-zinc-100", "{value}" }
        }
    }
}
