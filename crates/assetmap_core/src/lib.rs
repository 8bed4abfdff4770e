pub mod error;
pub mod manifest;
pub mod mapper;
pub mod resolver;
pub mod traits;

pub mod prelude {
    pub use super::error::*;
    pub use super::manifest::*;
    pub use super::mapper::*;
    pub use super::resolver::*;
    pub use super::traits::*;
}
