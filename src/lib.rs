pub mod logger;
pub mod projection;
