pub mod error;
pub mod health;
pub mod login;
pub mod me;
pub mod refresh;
pub mod register;
pub mod state;

pub use error::{AuthApiError, ErrorResponse};
pub use health::{HealthResponse, HealthState, health};
pub use login::{LoginHttpResponse, login};
pub use me::me;
pub use refresh::{RefreshHttpResponse, refresh};
pub use register::{AuthRequest, UserHttpResponse, UserResponse, register};
pub use state::AuthState;
