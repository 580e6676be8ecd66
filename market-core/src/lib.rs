pub mod entities;
pub mod events;
pub mod value_objects;

// Re-export value objects at crate root for convenience
pub use value_objects::Symbol;

// Re-export entities at crate root
pub use entities::PriceLevel;

// Re-export events at crate root
pub use events::{DepthSnapshotEvent, ExchangeInfoEvent, SymbolInfoEvent, Ticker24hEvent};
