use dioxus::prelude::*;

use crate::api::{ApiError, SupabaseClient};
use crate::components::app_view::AppView;
use crate::components::audio_manager::PlayerController;
use crate::components::navigation::Navigation;
use crate::components::toast::Toasts;

#[component]
pub fn AuthView() -> Element {
    let controller = use_context::<PlayerController>();
    let navigation = use_context::<Navigation>();
    let toasts = use_context::<Toasts>();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut signup_mode = use_signal(|| false);
    let mut busy = use_signal(|| false);
    let mut form_error = use_signal(|| None::<String>);

    let mut submit = move || {
        if *busy.peek() {
            return;
        }
        let email_value = email.peek().trim().to_string();
        let password_value = password.peek().clone();
        if email_value.is_empty() || password_value.is_empty() {
            form_error.set(Some("Enter an email and a password.".to_string()));
            return;
        }

        busy.set(true);
        form_error.set(None);

        let signup = *signup_mode.peek();
        let config = controller.config.peek().clone();
        let mut session_signal = controller.session;
        spawn(async move {
            let client = SupabaseClient::new(config);
            let outcome = if signup {
                client.sign_up(&email_value, &password_value).await
            } else {
                client.sign_in(&email_value, &password_value).await.map(Some)
            };

            match outcome {
                Ok(Some(session)) => {
                    session_signal.set(Some(session));
                    toasts.success("Welcome back!");
                    navigation.navigate_to(AppView::Home);
                }
                Ok(None) => {
                    toasts.info("Check your email to confirm your account, then sign in.");
                    signup_mode.set(false);
                }
                Err(ApiError::Unauthorized) => {
                    form_error.set(Some("Wrong email or password.".to_string()));
                }
                Err(err) => {
                    form_error.set(Some(format!("Sign-in failed: {err}")));
                }
            }
            busy.set(false);
        });
    };

    let title = if signup_mode() {
        "Create an account"
    } else {
        "Sign in to Lectern"
    };
    let submit_label = if signup_mode() { "Sign Up" } else { "Sign In" };
    let switch_label = if signup_mode() {
        "Already have an account? Sign in"
    } else {
        "New here? Create an account"
    };

    rsx! {
        div { class: "flex justify-center py-12",
            div { class: "w-full max-w-sm rounded-xl border border-zinc-800 bg-zinc-900 p-6",
                h2 { class: "pb-6 text-xl font-semibold text-zinc-100", "{title}" }

                form {
                    class: "space-y-4",
                    onsubmit: move |event| {
                        event.prevent_default();
                        submit();
                    },
                    div {
                        label { class: "block pb-1 text-xs font-medium text-zinc-400", "Email" }
                        input {
                            class: "w-full rounded-md border border-zinc-700 bg-zinc-800 px-3 py-2 text-sm text-zinc-100 focus:border-indigo-500 focus:outline-none",
                            r#type: "email",
                            placeholder: "you@example.com",
                            value: "{email}",
                            oninput: move |event| email.set(event.value()),
                        }
                    }
                    div {
                        label { class: "block pb-1 text-xs font-medium text-zinc-400", "Password" }
                        input {
                            class: "w-full rounded-md border border-zinc-700 bg-zinc-800 px-3 py-2 text-sm text-zinc-100 focus:border-indigo-500 focus:outline-none",
                            r#type: "password",
                            placeholder: "\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}",
                            value: "{password}",
                            oninput: move |event| password.set(event.value()),
                        }
                    }

                    if let Some(message) = form_error() {
                        p { class: "text-sm text-rose-400", "{message}" }
                    }

                    button {
                        class: "w-full rounded-md bg-indigo-600 py-2 text-sm font-medium text-white hover:bg-indigo-500 disabled:opacity-50",
                        r#type: "submit",
                        disabled: busy(),
                        if busy() {
                            "Working..."
                        } else {
                            "{submit_label}"
                        }
                    }
                }

                button {
                    class: "w-full pt-4 text-center text-xs text-zinc-400 hover:text-zinc-200",
                    onclick: move |_| {
                        let current = *signup_mode.peek();
                        signup_mode.set(!current);
                        form_error.set(None);
                    },
                    "{switch_label}"
                }
            }
        }
    }
}
