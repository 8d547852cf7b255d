pub mod credit;
pub mod verifier;

pub use credit::CreditService;
