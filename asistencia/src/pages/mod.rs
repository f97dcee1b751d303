pub mod callback;
pub mod groups;
pub mod login;
