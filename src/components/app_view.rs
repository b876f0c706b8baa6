//! Defines the shared application view state.

use crate::api::TopicWithStats;

#[derive(Clone, PartialEq)]
pub enum AppView {
    Home,
    TopicDetail(TopicWithStats),
    Bookmarks,
    Downloads,
    Profile,
    Auth,
    Settings,
}

pub fn view_label(view: &AppView) -> &'static str {
    match view {
        AppView::Home => "Home",
        AppView::TopicDetail(_) => "Topic",
        AppView::Bookmarks => "Bookmarks",
        AppView::Downloads => "Downloads",
        AppView::Profile => "Profile",
        AppView::Auth => "Sign In",
        AppView::Settings => "Settings",
    }
}
