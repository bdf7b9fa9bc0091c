//! Catalog use cases

mod get_dog_details;
mod get_homepage;
mod list_dogs;
mod search_dogs;

pub use get_dog_details::GetDogDetailsUseCase;
pub use get_homepage::GetHomepageUseCase;
pub use list_dogs::ListDogsUseCase;
pub use search_dogs::{SearchDogsResponse, SearchDogsUseCase};
