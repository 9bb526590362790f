pub mod cache;
pub mod message;
pub mod transport;

pub use cache::ResolutionCache;
pub use message::{MessageBuilder, RecordTypeMapper, ResponseParser};
pub use transport::UdpTransport;
