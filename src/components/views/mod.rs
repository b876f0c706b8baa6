mod auth;
mod bookmarks;
mod downloads;
mod home;
mod profile;
mod settings;
mod topic_detail;

pub use auth::AuthView;
pub use bookmarks::BookmarksView;
pub use downloads::DownloadsView;
pub use home::HomeView;
pub use profile::ProfileView;
pub use settings::SettingsView;
pub use topic_detail::TopicDetailView;
