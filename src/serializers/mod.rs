//! Serialization layer - Entity representation and input transforms.
//!
//! Each transform receives its collaborators explicitly: a [`RequestContext`]
//! for absolute URLs and the acting user, and a [`UnitOfWork`] for entity
//! lookups. Handlers stay thin and delegate here.
//!
//! [`UnitOfWork`]: crate::infra::UnitOfWork

mod context;
pub mod product;
pub mod registration;
pub mod shop;
pub mod user;

pub use context::RequestContext;
pub use product::{ImageInput, ProductInput, ProductListItem, ProductRepresentation};
pub use registration::{RegisteredUser, RegistrationInput};
pub use shop::{ShopCreateInput, ShopRepresentation};
pub use user::{UserRepresentation, UserUpdateInput};
