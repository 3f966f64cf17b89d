//! Domain models for the dealership site.
//!
//! Database row types live in the `db` module; these are the validated
//! domain objects handlers and templates work with.

pub mod account;
pub mod favorite;
pub mod session;
pub mod vehicle;

pub use account::Account;
pub use favorite::FavoriteVehicle;
pub use session::{CurrentAccount, session_keys};
pub use vehicle::{Classification, NewVehicle, Vehicle, VehicleUpdate};
