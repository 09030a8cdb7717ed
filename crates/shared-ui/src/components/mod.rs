pub mod button;
pub mod card;
pub mod input;
pub mod label;

// Re-exports for convenience
pub use button::*;
pub use card::*;
pub use input::*;
pub use label::*;
