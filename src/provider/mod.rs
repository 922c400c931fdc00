// Provider module: the data-provider boundary and its Yahoo! Finance implementation.

pub mod fetcher;
pub mod traits;

pub use fetcher::YahooProvider;
pub use traits::{PriceProvider, PriceRequest};
