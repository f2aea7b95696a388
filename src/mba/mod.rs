//! ManufacturerBlockAccess engine
//!
//! Everything between a command descriptor and the bus: the request
//! encoder, the port abstraction with its mock, timing, and the device
//! handle that sends, reads and reports.

pub mod frame;
pub mod handle;
pub mod mock;
pub mod port;
pub mod timing;

pub use frame::{encode_request, RawResponse};
pub use handle::MbaDeviceHandle;
pub use mock::{MockReply, MockSmbusPort, Transmission};
pub use port::SmbusPort;
pub use timing::{MbaTiming, TimingConfig};
