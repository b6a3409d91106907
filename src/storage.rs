mod users;

pub use users::{UserStore, UserStoreErrorKind};
