mod app_shell;
pub use app_shell::AppShell;

mod home;
pub use home::Home;

mod users;
pub use users::Users;

mod not_found;
pub use not_found::NotFound;
