mod link;
mod start;
mod unrecognized;

pub use link::link;
pub use start::start;
pub use unrecognized::unrecognized;
