mod error;
mod requests;
mod types;

pub use error::ValidationError;
pub use requests::{
    CreateActivityRequest, CreateArticleRequest, CreateEventRequest, CreateUserRequest,
    UpdateActivityRequest, UpdateArticleRequest, UpdateEventRequest, UpdateUserRequest,
};
pub use types::{Activity, Article, Event, UserProfile, UserRole};
