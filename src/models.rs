pub mod tikwm;
pub mod youtube;

pub use tikwm::TikwmResponse;
pub use youtube::VideoDetails;
