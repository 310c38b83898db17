pub mod endpoint;
pub mod fetcher;
pub mod transport;

pub use endpoint::{lookup_url, random_url, request_url, DEFAULT_BASE_URL};
pub use fetcher::{FetchConfig, Settled, VerseFetcher};
pub use transport::{HttpTransport, Transport, TransportError};
