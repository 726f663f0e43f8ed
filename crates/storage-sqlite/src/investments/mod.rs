//! SQLite storage implementation for investments.

mod model;
mod repository;

pub use model::InvestmentDB;
pub use repository::InvestmentRepository;
