pub mod cloudinary;
pub mod error;
mod signature;

pub use cloudinary::{CloudinaryClient, CloudinaryConfig};
pub use error::MediaError;
