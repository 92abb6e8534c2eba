// src/services/access_gate.rs
//
// Decides what a viewer may see of a single plan. Pure; all lookups happen
// before this is called.

use uuid::Uuid;

use crate::dtos::plan_dtos::PlanOut;
use crate::models::plan::PlanWithTrainer;

/// An authenticated viewer and whether they hold an active subscription to
/// the plan being rendered.
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    pub user_id: Uuid,
    pub has_active_subscription: bool,
}

/// `content` survives iff the viewer is subscribed or wrote the plan.
/// `isSubscribed` reflects the subscription only, so an owner previewing
/// their own plan sees the content with `isSubscribed: false`.
pub fn render_plan(plan: PlanWithTrainer, viewer: Option<&Viewer>) -> PlanOut {
    let subscribed = viewer.is_some_and(|v| v.has_active_subscription);
    let owner = viewer.is_some_and(|v| plan.plan.is_owned_by(v.user_id));

    let out = PlanOut::full(plan).with_subscription(subscribed);
    if subscribed || owner { out } else { out.without_content() }
}
