pub mod destinations;
pub mod navigation;
pub mod session;
