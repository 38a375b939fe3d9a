mod directory;
mod error;
pub mod login;
mod sign_up;

pub use directory::DirectoryPage;
pub use error::ErrorPage;
pub use login::LoginPage;
pub use sign_up::SignUpPage;
