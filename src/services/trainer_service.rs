// src/services/trainer_service.rs
use uuid::Uuid;

use crate::dtos::trainer_dtos::{TrainerOut, TrainerProfileOut};
use crate::errors::ApiError;
use crate::models::user::User;
use crate::repositories::Repositories;
use crate::services::{follow_service, plan_service};

pub async fn list(repos: &Repositories) -> Result<Vec<TrainerOut>, ApiError> {
    Ok(repos
        .users
        .list_trainers()
        .await?
        .iter()
        .map(TrainerOut::from)
        .collect())
}

/// A trainer's page. `viewer` is whoever the credential resolved to, if
/// anything; without one `isFollowing` is false.
pub async fn profile(
    repos: &Repositories,
    trainer_id: Uuid,
    viewer: Option<&User>,
) -> Result<TrainerProfileOut, ApiError> {
    let trainer = repos
        .users
        .find_by_id(trainer_id)
        .await?
        .filter(User::is_trainer)
        .ok_or_else(|| ApiError::not_found("Trainer not found"))?;

    let plans = plan_service::list_by_trainer(repos, trainer.id).await?;
    let is_following = match viewer {
        Some(v) => follow_service::is_following(repos, v.id, trainer.id).await?,
        None => false,
    };

    Ok(TrainerProfileOut {
        trainer: TrainerOut::from(&trainer),
        plans,
        is_following,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{NewUser, Role};

    async fn user(repos: &Repositories, email: &str, role: Role) -> User {
        repos
            .users
            .insert(NewUser {
                name: email.into(),
                email: email.into(),
                password_hash: String::new(),
                role,
                bio: String::new(),
                avatar: String::new(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn directory_lists_only_trainers() {
        let repos = Repositories::in_memory();
        user(&repos, "t1@x.co", Role::Trainer).await;
        user(&repos, "u@x.co", Role::User).await;
        user(&repos, "t2@x.co", Role::Trainer).await;

        let emails: Vec<String> = list(&repos).await.unwrap().into_iter().map(|t| t.email).collect();
        assert_eq!(emails, vec!["t2@x.co", "t1@x.co"]);
    }

    #[tokio::test]
    async fn regular_users_have_no_trainer_page() {
        let repos = Repositories::in_memory();
        let member = user(&repos, "u@x.co", Role::User).await;
        let err = profile(&repos, member.id, None).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Trainer not found"));
    }

    #[tokio::test]
    async fn follow_status_reflects_the_viewer() {
        let repos = Repositories::in_memory();
        let trainer = user(&repos, "t@x.co", Role::Trainer).await;
        let member = user(&repos, "u@x.co", Role::User).await;
        follow_service::follow(&repos, &member, trainer.id).await.unwrap();

        assert!(profile(&repos, trainer.id, Some(&member)).await.unwrap().is_following);
        assert!(!profile(&repos, trainer.id, None).await.unwrap().is_following);
    }
}
