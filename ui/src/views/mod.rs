mod home;
mod studio;
mod trends;

pub use home::Home;
pub use studio::Studio;
pub use trends::Trends;
