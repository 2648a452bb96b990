pub mod error;
pub mod platform;

pub use platform::Platform;
