// Services module - external collaborators of the auth core

pub mod google;
pub mod users;

pub use google::{GoogleOauthClient, GoogleOauthConfig};
pub use users::UserService;
