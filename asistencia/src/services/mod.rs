pub mod client;
pub mod credentials;
pub mod error;

use crate::services::client::ApiClient;
use crate::services::credentials::BrowserSession;

/// Client used by the running application.
pub type Api = ApiClient<BrowserSession>;
