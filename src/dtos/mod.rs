pub mod api_response;
pub mod auth_dtos;
pub mod follow_dtos;
pub mod plan_dtos;
pub mod subscription_dtos;
pub mod trainer_dtos;
// short aliases: `crate::dtos::auth`, `crate::dtos::plan`
pub use auth_dtos as auth;
pub use plan_dtos as plan;
