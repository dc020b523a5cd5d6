mod user_list;
pub use user_list::UserListView;

mod vaccination;
pub use vaccination::VaccinationView;
