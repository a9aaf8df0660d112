//! Adapters for the broker's environment ports.

mod location;
mod navigator;
mod system_clock;

pub use location::FixedLocation;
pub use navigator::ConsoleNavigator;
pub use system_clock::SystemClock;
