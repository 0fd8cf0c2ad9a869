//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod login;
pub mod register;
pub mod session_token;
pub mod verify_email;

// Re-exports
pub use check_session::{AuthenticatedUser, CheckSessionUseCase};
pub use config::{AuthConfig, MailFailurePolicy};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use session_token::SessionToken;
pub use verify_email::{VerifyEmailInput, VerifyEmailUseCase};
