pub mod hash;
pub mod health;
