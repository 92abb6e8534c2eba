// src/repositories/memory_store.rs
//
// In-process store used by tests and by `STORE=memory`. One lock guards all
// collections, so each write is atomic and unique pairs are checked under
// the same lock that inserts them.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::follow::{Follow, NewFollow};
use crate::models::plan::{NewPlan, Plan, PlanChanges};
use crate::models::subscription::{NewSubscription, Subscription};
use crate::models::user::{NewUser, Role, User};
use crate::repositories::{
    FollowRepository, PlanRepository, RepoError, SubscriptionRepository, UserRepository,
};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    plans: Vec<Plan>,
    follows: Vec<Follow>,
    subscriptions: Vec<Subscription>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

/// Clones matching records, newest first. Records sharing a timestamp come
/// out in reverse insertion order.
fn newest_first<T, F, K>(items: &[T], keep: F, created_at: K) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
    K: Fn(&T) -> chrono::DateTime<Utc>,
{
    let mut out: Vec<T> = items.iter().rev().filter(|i| keep(*i)).cloned().collect();
    out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    out
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        let mut db = self.inner.write().await;
        if db.users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Conflict);
        }
        let row = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            bio: user.bio,
            avatar: user.avatar,
            created_at: Utc::now(),
        };
        db.users.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let db = self.inner.read().await;
        Ok(db.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let db = self.inner.read().await;
        Ok(db.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let db = self.inner.read().await;
        Ok(db.users.iter().filter(|u| ids.contains(&u.id)).cloned().collect())
    }

    async fn list_trainers(&self) -> Result<Vec<User>, RepoError> {
        let db = self.inner.read().await;
        Ok(newest_first(&db.users, |u| u.role == Role::Trainer, |u| u.created_at))
    }
}

#[async_trait]
impl PlanRepository for MemoryStore {
    async fn insert(&self, plan: NewPlan) -> Result<Plan, RepoError> {
        let mut db = self.inner.write().await;
        let now = Utc::now();
        let row = Plan {
            id: Uuid::new_v4(),
            title: plan.title,
            description: plan.description,
            price: plan.price,
            duration: plan.duration,
            trainer_id: plan.trainer_id,
            content: plan.content,
            image: plan.image,
            created_at: now,
            updated_at: now,
        };
        db.plans.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, RepoError> {
        let db = self.inner.read().await;
        Ok(db.plans.iter().find(|p| p.id == id).cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Plan>, RepoError> {
        let db = self.inner.read().await;
        Ok(db.plans.iter().filter(|p| ids.contains(&p.id)).cloned().collect())
    }

    async fn list_all(&self) -> Result<Vec<Plan>, RepoError> {
        let db = self.inner.read().await;
        Ok(newest_first(&db.plans, |_| true, |p| p.created_at))
    }

    async fn list_by_trainers(&self, trainer_ids: &[Uuid]) -> Result<Vec<Plan>, RepoError> {
        let db = self.inner.read().await;
        Ok(newest_first(
            &db.plans,
            |p| trainer_ids.contains(&p.trainer_id),
            |p| p.created_at,
        ))
    }

    async fn update(&self, id: Uuid, changes: PlanChanges) -> Result<Option<Plan>, RepoError> {
        let mut db = self.inner.write().await;
        Ok(db.plans.iter_mut().find(|p| p.id == id).map(|plan| {
            plan.apply(changes, Utc::now());
            plan.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut db = self.inner.write().await;
        let before = db.plans.len();
        db.plans.retain(|p| p.id != id);
        Ok(db.plans.len() < before)
    }
}

#[async_trait]
impl FollowRepository for MemoryStore {
    async fn insert(&self, follow: NewFollow) -> Result<Follow, RepoError> {
        let mut db = self.inner.write().await;
        let taken = db
            .follows
            .iter()
            .any(|f| f.follower_id == follow.follower_id && f.trainer_id == follow.trainer_id);
        if taken {
            return Err(RepoError::Conflict);
        }
        let row = Follow {
            id: Uuid::new_v4(),
            follower_id: follow.follower_id,
            trainer_id: follow.trainer_id,
            created_at: Utc::now(),
        };
        db.follows.push(row.clone());
        Ok(row)
    }

    async fn find(&self, follower_id: Uuid, trainer_id: Uuid) -> Result<Option<Follow>, RepoError> {
        let db = self.inner.read().await;
        Ok(db
            .follows
            .iter()
            .find(|f| f.follower_id == follower_id && f.trainer_id == trainer_id)
            .cloned())
    }

    async fn delete(&self, follower_id: Uuid, trainer_id: Uuid) -> Result<bool, RepoError> {
        let mut db = self.inner.write().await;
        let before = db.follows.len();
        db.follows
            .retain(|f| !(f.follower_id == follower_id && f.trainer_id == trainer_id));
        Ok(db.follows.len() < before)
    }

    async fn list_by_follower(&self, follower_id: Uuid) -> Result<Vec<Follow>, RepoError> {
        let db = self.inner.read().await;
        Ok(newest_first(
            &db.follows,
            |f| f.follower_id == follower_id,
            |f| f.created_at,
        ))
    }
}

#[async_trait]
impl SubscriptionRepository for MemoryStore {
    async fn insert(&self, subscription: NewSubscription) -> Result<Subscription, RepoError> {
        let mut db = self.inner.write().await;
        let taken = db
            .subscriptions
            .iter()
            .any(|s| s.user_id == subscription.user_id && s.plan_id == subscription.plan_id);
        if taken {
            return Err(RepoError::Conflict);
        }
        let row = Subscription {
            id: Uuid::new_v4(),
            user_id: subscription.user_id,
            plan_id: subscription.plan_id,
            status: subscription.status,
            expires_at: subscription.expires_at,
            created_at: subscription.created_at,
        };
        db.subscriptions.push(row.clone());
        Ok(row)
    }

    async fn find(&self, user_id: Uuid, plan_id: Uuid) -> Result<Option<Subscription>, RepoError> {
        let db = self.inner.read().await;
        Ok(db
            .subscriptions
            .iter()
            .find(|s| s.user_id == user_id && s.plan_id == plan_id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Subscription>, RepoError> {
        let db = self.inner.read().await;
        Ok(newest_first(
            &db.subscriptions,
            |s| s.user_id == user_id,
            |s| s.created_at,
        ))
    }

    async fn list_active_for_plans(
        &self,
        user_id: Uuid,
        plan_ids: &[Uuid],
    ) -> Result<Vec<Subscription>, RepoError> {
        let db = self.inner.read().await;
        Ok(db
            .subscriptions
            .iter()
            .filter(|s| s.user_id == user_id && s.is_active() && plan_ids.contains(&s.plan_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subscription::SubscriptionStatus;

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            name: "Someone".into(),
            email: email.into(),
            password_hash: "hash".into(),
            role,
            bio: String::new(),
            avatar: String::new(),
        }
    }

    fn new_plan(trainer_id: Uuid, title: &str) -> NewPlan {
        NewPlan {
            title: title.into(),
            description: "desc".into(),
            price: 10.0,
            duration: 14,
            trainer_id,
            content: "secret".into(),
            image: String::new(),
        }
    }

    #[tokio::test]
    async fn email_is_unique() {
        let store = MemoryStore::default();
        UserRepository::insert(&store, new_user("a@b.co", Role::User)).await.unwrap();
        let err = UserRepository::insert(&store, new_user("a@b.co", Role::Trainer))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Conflict));
    }

    #[tokio::test]
    async fn follow_pair_is_unique() {
        let store = MemoryStore::default();
        let edge = NewFollow::new(Uuid::new_v4(), Uuid::new_v4()).unwrap();
        FollowRepository::insert(&store, edge).await.unwrap();
        let err = FollowRepository::insert(&store, edge).await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict));
        assert_eq!(store.list_by_follower(edge.follower_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn subscription_pair_is_unique_regardless_of_status() {
        let store = MemoryStore::default();
        let (user, plan) = (Uuid::new_v4(), Uuid::new_v4());
        let mut first = NewSubscription::active(user, plan, None, Utc::now()).unwrap();
        first.status = SubscriptionStatus::Expired;
        SubscriptionRepository::insert(&store, first).await.unwrap();

        let again = NewSubscription::active(user, plan, None, Utc::now()).unwrap();
        let err = SubscriptionRepository::insert(&store, again).await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict));
    }

    #[tokio::test]
    async fn plans_list_newest_first() {
        let store = MemoryStore::default();
        let trainer = Uuid::new_v4();
        PlanRepository::insert(&store, new_plan(trainer, "first")).await.unwrap();
        PlanRepository::insert(&store, new_plan(trainer, "second")).await.unwrap();
        PlanRepository::insert(&store, new_plan(Uuid::new_v4(), "other")).await.unwrap();

        let titles: Vec<String> = store
            .list_by_trainers(&[trainer])
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["second", "first"]);
        assert_eq!(store.list_all().await.unwrap()[0].title, "other");
    }

    #[tokio::test]
    async fn deleting_a_plan_keeps_its_subscriptions() {
        let store = MemoryStore::default();
        let plan = PlanRepository::insert(&store, new_plan(Uuid::new_v4(), "p")).await.unwrap();
        let user = Uuid::new_v4();
        SubscriptionRepository::insert(&store, NewSubscription::active(user, plan.id, Some(&plan), Utc::now()).unwrap())
            .await
            .unwrap();

        assert!(PlanRepository::delete(&store, plan.id).await.unwrap());
        assert!(!PlanRepository::delete(&store, plan.id).await.unwrap());
        assert_eq!(store.list_by_user(user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn active_lookup_skips_other_statuses_and_plans() {
        let store = MemoryStore::default();
        let user = Uuid::new_v4();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        SubscriptionRepository::insert(&store, NewSubscription::active(user, a, None, Utc::now()).unwrap())
            .await
            .unwrap();
        let mut cancelled = NewSubscription::active(user, b, None, Utc::now()).unwrap();
        cancelled.status = SubscriptionStatus::Cancelled;
        SubscriptionRepository::insert(&store, cancelled).await.unwrap();
        SubscriptionRepository::insert(&store, NewSubscription::active(user, c, None, Utc::now()).unwrap())
            .await
            .unwrap();

        let found = store.list_active_for_plans(user, &[a, b]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].plan_id, a);
    }
}
