pub mod auth_modal;
pub mod card_tile;
pub mod field;
pub mod result_banner;
pub mod scratch_grid;
pub mod wallet_form;
