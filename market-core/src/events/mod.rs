mod depth;
mod exchange_info;
mod ticker;

pub use depth::DepthSnapshotEvent;
pub use exchange_info::{ExchangeInfoEvent, SymbolInfoEvent};
pub use ticker::Ticker24hEvent;
