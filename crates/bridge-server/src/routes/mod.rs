pub mod assess;
pub mod health;
