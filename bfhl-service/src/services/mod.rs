pub mod math;
pub mod oracle;
pub mod providers;
