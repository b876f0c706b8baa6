//! Transient notification stack, provided through context so any view can
//! report the outcome of a background action.

use dioxus::prelude::*;
use uuid::Uuid;

const TOAST_DISMISS_MS: u32 = 4000;

#[derive(Clone, Copy, PartialEq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct Toasts {
    entries: Signal<Vec<Toast>>,
}

impl Toasts {
    pub fn new(entries: Signal<Vec<Toast>>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> Vec<Toast> {
        (self.entries)()
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        let id = Uuid::new_v4();
        let mut entries = self.entries;
        entries.write().push(Toast { id, kind, message });

        spawn(async move {
            toast_delay().await;
            entries.write().retain(|toast| toast.id != id);
        });
    }

    pub fn dismiss(&self, id: Uuid) {
        let mut entries = self.entries;
        entries.write().retain(|toast| toast.id != id);
    }
}

#[cfg(target_arch = "wasm32")]
async fn toast_delay() {
    gloo_timers::future::TimeoutFuture::new(TOAST_DISMISS_MS).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn toast_delay() {
    tokio::time::sleep(std::time::Duration::from_millis(TOAST_DISMISS_MS as u64)).await;
}

#[component]
pub fn ToastHost() -> Element {
    let toasts = use_context::<Toasts>();
    let entries = toasts.entries();

    rsx! {
        div { class: "fixed bottom-24 right-4 z-50 flex flex-col gap-2 pointer-events-none",
            for toast in entries {
                div {
                    key: "{toast.id}",
                    class: {
                        let accent = match toast.kind {
                            ToastKind::Info => "border-sky-500",
                            ToastKind::Success => "border-emerald-500",
                            ToastKind::Error => "border-rose-500",
                        };
                        format!(
                            "pointer-events-auto flex items-center gap-3 rounded-lg border-l-4 {accent} bg-zinc-800 px-4 py-3 text-sm text-zinc-100 shadow-lg"
                        )
                    },
                    span { "{toast.message}" }
                    button {
                        class: "ml-2 text-zinc-400 hover:text-zinc-100",
                        onclick: {
                            let id = toast.id;
                            move |_| toasts.dismiss(id)
                        },
                        "\u{2715}"
                    }
                }
            }
        }
    }
}
