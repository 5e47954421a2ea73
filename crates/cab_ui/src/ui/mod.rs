pub mod app_shell;
pub mod map_tab;
pub mod ride_tab;
