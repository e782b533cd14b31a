pub mod logger;

pub use logger::log_requests;
