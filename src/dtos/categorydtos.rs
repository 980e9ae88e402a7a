use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

//Service category DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 50, message = "Category name must be between 1 and 50 characters"))]
    pub category_name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub category_description: Option<String>,

    #[validate(url(message = "Invalid icon URL"))]
    pub icon_url: Option<String>,

    #[validate(range(min = 0.0, message = "Base rate must be positive"))]
    pub base_rate: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateCategoryDto {
    pub id: Uuid,

    #[validate(length(min = 1, max = 50, message = "Category name must be between 1 and 50 characters"))]
    pub category_name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub category_description: Option<String>,

    #[validate(url(message = "Invalid icon URL"))]
    pub icon_url: Option<String>,

    #[validate(range(min = 0.0, message = "Base rate must be positive"))]
    pub base_rate: Option<f64>,

    pub is_active: bool,
}
