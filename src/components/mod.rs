//! Shared components for the app shell, player, and views.

mod app;
mod app_view;
mod audio_manager;
mod icons;
mod navigation;
mod player;
mod sidebar;
mod toast;
pub mod views;

pub use app::*;
pub use app_view::*;
pub use audio_manager::*;
pub use icons::*;
pub use navigation::*;
pub use player::*;
pub use sidebar::*;
pub use toast::*;
