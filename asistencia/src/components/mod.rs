pub mod attendance_sheet;
pub mod group_card;
pub mod loader;
pub mod modal;
pub mod sessions_dialog;
pub mod snackbar;
pub mod stat_card;
