pub mod dispatch;
pub mod metrics;
pub mod numeric;
pub mod providers;

pub use dispatch::dispatch;
