pub mod aggregate;

pub use aggregate::WcConnection;
