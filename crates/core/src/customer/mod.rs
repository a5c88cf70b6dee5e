mod types;

pub use types::Customer;
