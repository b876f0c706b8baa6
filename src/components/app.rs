//! Top-level shell: context providers, persisted state bootstrap, and layout.

use dioxus::prelude::*;

use crate::api::{AuthSession, SupabaseConfig};
use crate::components::app_view::{view_label, AppView};
use crate::components::audio_manager::{AudioController, PlayerController, Transport};
use crate::components::icons::Icon;
use crate::components::navigation::Navigation;
use crate::components::player::Player;
use crate::components::sidebar::Sidebar;
use crate::components::toast::{Toast, ToastHost, Toasts};
use crate::components::views;
use crate::db::{self, AppSettings};

#[component]
pub fn AppShell() -> Element {
    let current_view = use_signal(|| AppView::Home);
    let history = use_signal(Vec::<AppView>::new);
    let navigation = use_context_provider(|| Navigation::new(current_view, history));

    let transport = use_signal(Transport::default);
    let config = use_signal(SupabaseConfig::from_env);
    let session = use_signal(|| None::<AuthSession>);
    use_context_provider(|| PlayerController {
        transport,
        config,
        session,
    });

    let toast_entries = use_signal(Vec::<Toast>::new);
    use_context_provider(|| Toasts::new(toast_entries));

    let mut db_ready = use_signal(|| false);
    let mut last_saved_settings = use_signal(AppSettings::default);
    let mut sidebar_open = use_signal(|| false);

    // Restore persisted settings and the stored session before anything else
    // touches the transport.
    use_effect(move || {
        let mut transport = transport;
        let mut session = session;
        spawn(async move {
            if let Err(err) = db::initialize_database().await {
                tracing::warn!("local storage unavailable: {err}");
            }

            match db::load_settings().await {
                Ok(settings) => {
                    {
                        let mut transport = transport.write();
                        transport.set_volume(settings.volume);
                        transport.set_speed(settings.playback_speed);
                    }
                    last_saved_settings.set(settings);
                }
                Err(err) => tracing::warn!("failed to load settings: {err}"),
            }

            match db::load_session().await {
                Ok(stored) => session.set(stored),
                Err(err) => tracing::warn!("failed to load stored session: {err}"),
            }

            db_ready.set(true);
        });
    });

    // Autosave volume/speed whenever they drift from the last persisted value.
    use_effect(move || {
        let snapshot = {
            let transport = transport.read();
            AppSettings {
                volume: transport.volume(),
                playback_speed: transport.speed(),
            }
        };
        if !*db_ready.peek() || snapshot == *last_saved_settings.peek() {
            return;
        }
        last_saved_settings.set(snapshot.clone());
        spawn(async move {
            if let Err(err) = db::save_settings(snapshot).await {
                tracing::warn!("failed to persist settings: {err}");
            }
        });
    });

    // Mirror the session signal into storage on sign-in and sign-out.
    use_effect(move || {
        let current = session();
        if !*db_ready.peek() {
            return;
        }
        spawn(async move {
            if let Err(err) = db::save_session(current).await {
                tracing::warn!("failed to persist session: {err}");
            }
        });
    });

    let view = navigation.current_view();

    rsx! {
        div { class: "flex h-screen overflow-hidden bg-zinc-950 text-zinc-100",
            Sidebar { open: sidebar_open }

            div { class: "flex min-w-0 flex-1 flex-col",
                header { class: "flex items-center gap-3 border-b border-zinc-800 px-4 py-3 md:hidden",
                    button {
                        class: "rounded-md p-1 text-zinc-300 hover:bg-zinc-800",
                        onclick: move |_| {
                            let open = *sidebar_open.peek();
                            sidebar_open.set(!open);
                        },
                        Icon { name: "menu", class: "h-6 w-6" }
                    }
                    if navigation.can_go_back() {
                        button {
                            class: "rounded-md p-1 text-zinc-300 hover:bg-zinc-800",
                            onclick: move |_| {
                                navigation.go_back();
                            },
                            Icon { name: "arrow-left", class: "h-6 w-6" }
                        }
                    }
                    h1 { class: "text-base font-semibold", "{view_label(&view)}" }
                }

                main { class: "flex-1 overflow-y-auto px-4 py-6 pb-36 md:px-8",
                    match view {
                        AppView::Home => rsx! {
                            views::HomeView {}
                        },
                        AppView::TopicDetail(topic) => rsx! {
                            views::TopicDetailView { topic }
                        },
                        AppView::Bookmarks => rsx! {
                            views::BookmarksView {}
                        },
                        AppView::Downloads => rsx! {
                            views::DownloadsView {}
                        },
                        AppView::Profile => rsx! {
                            views::ProfileView {}
                        },
                        AppView::Auth => rsx! {
                            views::AuthView {}
                        },
                        AppView::Settings => rsx! {
                            views::SettingsView {}
                        },
                    }
                }
            }

            Player {}
            ToastHost {}
            AudioController {}
        }
    }
}
