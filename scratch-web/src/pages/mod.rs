pub mod home;
pub mod not_found;
pub mod play;
pub mod wallet;
