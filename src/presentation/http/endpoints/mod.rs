pub mod broadcast;
pub mod health;
pub mod recipients;
pub mod root;
