pub mod access_gate;
pub mod auth_services;
pub mod feed_service;
pub mod follow_service;
pub mod plan_service;
pub mod subscription_service;
pub mod token_service;
pub mod trainer_service;
