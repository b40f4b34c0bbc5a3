pub mod error;
pub mod jpeg;
pub mod providers;
pub mod recognition;
pub mod transport;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use error::{RecognitionError, TransportError};
pub use providers::{AvailabilitySource, ProviderResponse, ProvidersClient};
pub use recognition::RecognitionClient;
pub use transport::{FilePart, HttpResponse, HttpTransport, ReqwestTransport};
