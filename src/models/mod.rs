pub mod follow;
pub mod plan;
pub mod subscription;
pub mod user;
