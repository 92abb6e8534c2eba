// src/services/follow_service.rs
use log::info;
use uuid::Uuid;

use crate::dtos::follow_dtos::FollowOut;
use crate::errors::ApiError;
use crate::models::follow::NewFollow;
use crate::models::user::{PublicProfile, User};
use crate::repositories::{RepoError, Repositories};

const ALREADY_FOLLOWING: &str = "Already following this trainer";

/// Checked in this order: self-follow, trainer exists, target is a trainer,
/// edge absent. The unique index decides races past the last check.
pub async fn follow(repos: &Repositories, follower: &User, trainer_id: Uuid) -> Result<FollowOut, ApiError> {
    let edge = NewFollow::new(follower.id, trainer_id)
        .map_err(|_| ApiError::conflict("Cannot follow yourself"))?;

    let trainer = repos
        .users
        .find_by_id(trainer_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Trainer not found"))?;
    if !trainer.is_trainer() {
        return Err(ApiError::bad_request("User is not a trainer"));
    }

    if repos.follows.find(follower.id, trainer_id).await?.is_some() {
        return Err(ApiError::conflict(ALREADY_FOLLOWING));
    }

    let created = repos.follows.insert(edge).await.map_err(|e| match e {
        RepoError::Conflict => ApiError::conflict(ALREADY_FOLLOWING),
        other => other.into(),
    })?;

    info!("User {} followed trainer {}", follower.id, trainer_id);
    Ok(FollowOut {
        id: created.id,
        follower: created.follower_id,
        trainer: trainer.profile(),
        created_at: created.created_at,
    })
}

pub async fn unfollow(repos: &Repositories, follower: &User, trainer_id: Uuid) -> Result<(), ApiError> {
    if !repos.follows.delete(follower.id, trainer_id).await? {
        return Err(ApiError::not_found("Not following this trainer"));
    }
    info!("User {} unfollowed trainer {}", follower.id, trainer_id);
    Ok(())
}

/// Followed trainers' profiles, most recently followed first. Edges whose
/// trainer no longer resolves are skipped.
pub async fn list_followed(repos: &Repositories, follower_id: Uuid) -> Result<Vec<PublicProfile>, ApiError> {
    let follows = repos.follows.list_by_follower(follower_id).await?;
    let ids: Vec<Uuid> = follows.iter().map(|f| f.trainer_id).collect();
    let trainers = repos.users.find_many(&ids).await?;

    Ok(follows
        .iter()
        .filter_map(|f| trainers.iter().find(|t| t.id == f.trainer_id))
        .map(User::profile)
        .collect())
}

pub async fn is_following(repos: &Repositories, follower_id: Uuid, trainer_id: Uuid) -> Result<bool, ApiError> {
    Ok(repos.follows.find(follower_id, trainer_id).await?.is_some())
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
    async fn follow_then_list_then_unfollow_twice() {
        let repos = Repositories::in_memory();
        let trainer = user(&repos, "t@x.co", Role::Trainer).await;
        let member = user(&repos, "u@x.co", Role::User).await;

        let edge = follow(&repos, &member, trainer.id).await.unwrap();
        assert_eq!(edge.trainer.id, trainer.id);
        assert!(is_following(&repos, member.id, trainer.id).await.unwrap());
        assert_eq!(list_followed(&repos, member.id).await.unwrap(), vec![trainer.profile()]);

        unfollow(&repos, &member, trainer.id).await.unwrap();
        let again = unfollow(&repos, &member, trainer.id).await.unwrap_err();
        assert!(matches!(again, ApiError::NotFound(ref m) if m == "Not following this trainer"));
    }

    #[tokio::test]
    async fn rejections_are_distinguishable() {
        let repos = Repositories::in_memory();
        let trainer = user(&repos, "t@x.co", Role::Trainer).await;
        let member = user(&repos, "u@x.co", Role::User).await;
        let other = user(&repos, "o@x.co", Role::User).await;

        let missing = follow(&repos, &member, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(missing, ApiError::NotFound(_)));

        let not_trainer = follow(&repos, &member, other.id).await.unwrap_err();
        assert!(matches!(not_trainer, ApiError::BadRequest(_)));

        let own = follow(&repos, &member, member.id).await.unwrap_err();
        assert_eq!(own.to_string(), "Cannot follow yourself");

        follow(&repos, &member, trainer.id).await.unwrap();
        let dup = follow(&repos, &member, trainer.id).await.unwrap_err();
        assert_eq!(dup.to_string(), ALREADY_FOLLOWING);
    }

    #[tokio::test]
    async fn self_follow_is_rejected_even_for_a_trainer() {
        let repos = Repositories::in_memory();
        let trainer = user(&repos, "t@x.co", Role::Trainer).await;
        let err = follow(&repos, &trainer, trainer.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
        assert!(!is_following(&repos, trainer.id, trainer.id).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_duplicate_follows_store_one_edge() {
        let repos = Repositories::in_memory();
        let trainer = user(&repos, "t@x.co", Role::Trainer).await;
        let member = user(&repos, "u@x.co", Role::User).await;

        let (a, b) = tokio::join!(
            follow(&repos, &member, trainer.id),
            follow(&repos, &member, trainer.id)
        );

        assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
        let rejected = a.err().or(b.err()).unwrap();
        assert!(matches!(rejected, ApiError::Conflict(_)));
        assert_eq!(repos.follows.list_by_follower(member.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_follows_across_tasks_store_one_edge() {
        let repos = Repositories::in_memory();
        let trainer = user(&repos, "t@x.co", Role::Trainer).await;
        let member = user(&repos, "u@x.co", Role::User).await;

        let mut handles = Vec::new();
        for _ in 0..8 {
            let repos = repos.clone();
            let member = member.clone();
            let trainer_id = trainer.id;
            handles.push(tokio::spawn(async move { follow(&repos, &member, trainer_id).await.is_ok() }));
        }
        let mut successes = 0;
        for h in handles {
            if h.await.unwrap() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repos.follows.list_by_follower(member.id).await.unwrap().len(), 1);
    }
}
