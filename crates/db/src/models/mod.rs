pub mod alert;
pub mod animal;
pub mod chip;
pub mod enums;
pub mod health;
pub mod holding;
pub mod movement;
pub mod ownership;
pub mod user;
