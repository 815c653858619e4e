pub mod dispatch;
pub mod render;
pub mod validate;

pub use dispatch::dispatch;
