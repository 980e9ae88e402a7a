use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

//Review DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateReviewDto {
    pub booking_id: Uuid,

    pub reviewer_id: Uuid,

    pub reviewed_id: Uuid,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub comment: Option<String>,
}
