use dioxus::prelude::*;

use crate::components::app_view::AppView;
use crate::components::audio_manager::PlayerController;
use crate::components::icons::Icon;
use crate::components::navigation::Navigation;

#[component]
pub fn Sidebar(mut open: Signal<bool>) -> Element {
    let navigation = use_context::<Navigation>();
    let controller = use_context::<PlayerController>();
    let signed_in = controller.session.read().is_some();

    let panel_class = if open() {
        "fixed inset-y-0 left-0 z-40 w-64 transform translate-x-0 transition-transform bg-zinc-900 border-r border-zinc-800 flex flex-col md:static md:translate-x-0"
    } else {
        "fixed inset-y-0 left-0 z-40 w-64 transform -translate-x-full transition-transform bg-zinc-900 border-r border-zinc-800 flex flex-col md:static md:translate-x-0"
    };

    rsx! {
        if open() {
            div {
                class: "fixed inset-0 z-30 bg-black/50 md:hidden",
                onclick: move |_| open.set(false),
            }
        }
        aside { class: "{panel_class}",
            div { class: "flex items-center gap-3 px-5 py-5 border-b border-zinc-800",
                div { class: "flex h-9 w-9 items-center justify-center rounded-lg bg-indigo-600 text-lg font-bold text-white",
                    "L"
                }
                span { class: "text-lg font-semibold text-zinc-100", "Lectern" }
            }

            nav { class: "flex-1 overflow-y-auto px-3 py-4 space-y-6",
                div {
                    p { class: "px-2 pb-2 text-xs font-semibold uppercase tracking-wider text-zinc-500",
                        "Discover"
                    }
                    NavItem {
                        label: "Home",
                        icon: "home",
                        active: matches!(navigation.current_view(), AppView::Home),
                        target: AppView::Home,
                        open,
                    }
                }

                div {
                    p { class: "px-2 pb-2 text-xs font-semibold uppercase tracking-wider text-zinc-500",
                        "Library"
                    }
                    NavItem {
                        label: "Bookmarks",
                        icon: "bookmark",
                        active: matches!(navigation.current_view(), AppView::Bookmarks),
                        target: AppView::Bookmarks,
                        open,
                    }
                    NavItem {
                        label: "Downloads",
                        icon: "download",
                        active: matches!(navigation.current_view(), AppView::Downloads),
                        target: AppView::Downloads,
                        open,
                    }
                }

                div {
                    p { class: "px-2 pb-2 text-xs font-semibold uppercase tracking-wider text-zinc-500",
                        "Account"
                    }
                    if signed_in {
                        NavItem {
                            label: "Profile",
                            icon: "user",
                            active: matches!(navigation.current_view(), AppView::Profile),
                            target: AppView::Profile,
                            open,
                        }
                    } else {
                        NavItem {
                            label: "Sign In",
                            icon: "user",
                            active: matches!(navigation.current_view(), AppView::Auth),
                            target: AppView::Auth,
                            open,
                        }
                    }
                }
            }

            div { class: "border-t border-zinc-800 px-3 py-3",
                NavItem {
                    label: "Settings",
                    icon: "settings",
                    active: matches!(navigation.current_view(), AppView::Settings),
                    target: AppView::Settings,
                    open,
                }
            }
        }
    }
}

#[component]
fn NavItem(
    label: String,
    icon: String,
    active: bool,
    target: AppView,
    mut open: Signal<bool>,
) -> Element {
    let navigation = use_context::<Navigation>();

    let class = if active {
        "flex w-full items-center gap-3 rounded-lg bg-zinc-800 px-3 py-2 text-sm font-medium text-zinc-100"
    } else {
        "flex w-full items-center gap-3 rounded-lg px-3 py-2 text-sm font-medium text-zinc-400 hover:bg-zinc-800/60 hover:text-zinc-100"
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| {
                navigation.navigate_to(target.clone());
                open.set(false);
            },
            Icon { name: icon.clone(), class: "h-5 w-5" }
            span { "{label}" }
        }
    }
}
