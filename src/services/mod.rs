pub mod clock;
pub mod credentials;
pub mod store;
pub mod token;

pub use clock::{Clock, ManualClock, SystemClock};
pub use credentials::{CredentialVerifier, Identity, StaticCredentials};
pub use store::{MemoryStore, Page, Record, Store};
pub use token::{Claims, TokenService};
