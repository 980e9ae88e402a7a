use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "skill_level", rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Expert,
}

/// Link between a worker and a service category.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct WorkerSkill {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub category_id: Uuid,
    pub skill_level: Option<SkillLevel>,
    pub certification_url: Option<String>,
    pub certification_expiry: Option<NaiveDate>,
    pub years_experience: Option<i32>,
}
