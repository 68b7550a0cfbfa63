use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{db::DBClient, MilestoneExt, SubscriberExt},
    mail::mails::{send_milestone_admin_alert, send_milestone_congrats},
    models::{
        milestonemodel::{ReferralMilestone, RewardType},
        subscribermodel::Subscriber,
    },
    service::error::ServiceError,
};

/// Referral-milestone engine: evaluates thresholds on each confirmed
/// referral and dispatches the two-channel notification for every milestone
/// that was newly crossed.
#[derive(Debug, Clone)]
pub struct MilestoneService {
    db_client: Arc<DBClient>,
    admin_email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedEmailKind {
    AdminAlert,
    SubscriberCongrats,
}

/// One email the dispatcher intends to send. Planning is separated from
/// sending so the fan-out is checkable without a mail provider.
#[derive(Debug, Clone)]
pub struct PlannedEmail {
    pub kind: PlannedEmailKind,
    pub to: String,
    pub milestone: ReferralMilestone,
}

#[derive(Debug, Default)]
pub struct NotificationReport {
    pub attempted: usize,
    pub sent: usize,
    pub failed: Vec<String>,
}

#[derive(Debug)]
pub struct ReferralOutcome {
    pub new_count: i32,
    pub newly_achieved: Vec<ReferralMilestone>,
    pub notifications: NotificationReport,
}

impl MilestoneService {
    pub fn new(db_client: Arc<DBClient>, admin_email: Option<String>) -> Self {
        Self {
            db_client,
            admin_email,
        }
    }

    /// Select every milestone at or below the new count, then try to record
    /// an achievement for each. Only inserts that actually created a row
    /// count as newly achieved, which keeps repeat confirmations and
    /// concurrent increments from re-notifying. Returned in threshold order.
    pub async fn check_achievements(
        &self,
        referrer_id: Uuid,
        new_count: i32,
    ) -> Result<Vec<ReferralMilestone>, ServiceError> {
        let reached = self.db_client.milestones_reached(new_count).await?;

        let mut newly_achieved = Vec::new();
        for milestone in reached {
            let created = self
                .db_client
                .record_achievement(referrer_id, milestone.id)
                .await?;

            if created {
                tracing::info!(
                    "Milestone achieved: subscriber {} crossed '{}' (threshold {})",
                    referrer_id,
                    milestone.name,
                    milestone.threshold
                );
                newly_achieved.push(milestone);
            }
        }

        Ok(newly_achieved)
    }

    /// Full referral path run on a referred subscriber's confirmation:
    /// atomically bump the referrer's count, evaluate milestones against the
    /// returned value, notify for the new ones.
    pub async fn handle_confirmed_referral(
        &self,
        referrer_id: Uuid,
    ) -> Result<ReferralOutcome, ServiceError> {
        let new_count = self
            .db_client
            .increment_referral_count(referrer_id)
            .await?;

        let newly_achieved = self.check_achievements(referrer_id, new_count).await?;

        if newly_achieved.is_empty() {
            return Ok(ReferralOutcome {
                new_count,
                newly_achieved,
                notifications: NotificationReport::default(),
            });
        }

        let referrer = self
            .db_client
            .get_subscriber(Some(referrer_id), None, None, None)
            .await?
            .ok_or(ServiceError::SubscriberNotFound(referrer_id))?;

        let notifications = self.notify_achievements(&referrer, &newly_achieved).await;

        Ok(ReferralOutcome {
            new_count,
            newly_achieved,
            notifications,
        })
    }

    /// Sends every planned email independently: a failed send never blocks
    /// the others and never rolls back the achievement rows. The report is
    /// logged so failed notifications are at least visible in the logs.
    pub async fn notify_achievements(
        &self,
        referrer: &Subscriber,
        milestones: &[ReferralMilestone],
    ) -> NotificationReport {
        if self.admin_email.is_none() {
            tracing::info!(
                "Admin milestone alerts skipped for {}: no ADMIN_EMAIL configured",
                referrer.email
            );
        }

        let plan = notification_plan(self.admin_email.as_deref(), &referrer.email, milestones);

        let mut report = NotificationReport {
            attempted: plan.len(),
            ..Default::default()
        };

        for planned in plan {
            let result = match planned.kind {
                PlannedEmailKind::AdminAlert => {
                    send_milestone_admin_alert(&planned.to, referrer, &planned.milestone).await
                }
                PlannedEmailKind::SubscriberCongrats => {
                    send_milestone_congrats(
                        &planned.to,
                        referrer.display_name(),
                        &planned.milestone,
                    )
                    .await
                }
            };

            match result {
                Ok(_) => report.sent += 1,
                Err(e) => {
                    let reason = format!(
                        "{:?} for '{}' to {}: {}",
                        planned.kind, planned.milestone.name, planned.to, e
                    );
                    tracing::error!("Milestone notification failed: {}", reason);
                    report.failed.push(reason);
                }
            }
        }

        if !report.failed.is_empty() {
            tracing::warn!(
                "{}/{} milestone notifications failed for {}",
                report.failed.len(),
                report.attempted,
                referrer.email
            );
        }

        report
    }
}

/// Expands newly achieved milestones into the emails to send: per milestone,
/// in threshold order, one admin alert (when an address is configured) then
/// one subscriber congratulations.
pub fn notification_plan(
    admin_email: Option<&str>,
    referrer_email: &str,
    milestones: &[ReferralMilestone],
) -> Vec<PlannedEmail> {
    let mut plan = Vec::new();

    for milestone in milestones {
        if let Some(admin) = admin_email {
            plan.push(PlannedEmail {
                kind: PlannedEmailKind::AdminAlert,
                to: admin.to_string(),
                milestone: milestone.clone(),
            });
        }

        plan.push(PlannedEmail {
            kind: PlannedEmailKind::SubscriberCongrats,
            to: referrer_email.to_string(),
            milestone: milestone.clone(),
        });
    }

    plan
}

/// Presentation lookup, keyed on milestone-name keywords.
pub fn badge_emoji(milestone_name: &str) -> &'static str {
    let name = milestone_name.to_lowercase();

    if name.contains("bronze") {
        "🥉"
    } else if name.contains("silver") {
        "🥈"
    } else if name.contains("gold") {
        "🥇"
    } else if name.contains("platinum") || name.contains("diamond") {
        "💎"
    } else if name.contains("starter") {
        "🌱"
    } else {
        "🏆"
    }
}

pub fn reward_copy(milestone: &ReferralMilestone) -> String {
    let value = milestone.reward_value.as_deref();

    match milestone.reward_type {
        Some(RewardType::Badge) => format!(
            "You've earned the {} badge!",
            value.unwrap_or(milestone.name.as_str())
        ),
        Some(RewardType::Discount) => match value {
            Some(v) => format!("Your reward: {} off your next renewal.", v),
            None => "A discount is waiting for you.".to_string(),
        },
        Some(RewardType::Content) => match value {
            Some(v) => format!("Exclusive content unlocked: {}", v),
            None => "Exclusive content has been unlocked for you.".to_string(),
        },
        Some(RewardType::Custom) => value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "A special reward is on its way.".to_string()),
        None => "Keep sharing to reach the next milestone!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn milestone(threshold: i32, name: &str, reward_type: Option<RewardType>) -> ReferralMilestone {
        ReferralMilestone {
            id: Uuid::new_v4(),
            threshold,
            name: name.to_string(),
            description: None,
            reward_type,
            reward_value: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn plan_sends_two_emails_per_milestone_in_threshold_order() {
        // Referrer at count 2 crossing to 3 with milestones at 1 and 3: both
        // become newly achieved in one pass and fan out to 4 sends.
        let milestones = vec![
            milestone(1, "Starter", Some(RewardType::Badge)),
            milestone(3, "Bronze", Some(RewardType::Badge)),
        ];

        let plan = notification_plan(Some("admin@example.com"), "fan@example.com", &milestones);

        assert_eq!(plan.len(), 4);
        assert_eq!(plan[0].kind, PlannedEmailKind::AdminAlert);
        assert_eq!(plan[0].milestone.threshold, 1);
        assert_eq!(plan[1].kind, PlannedEmailKind::SubscriberCongrats);
        assert_eq!(plan[1].milestone.threshold, 1);
        assert_eq!(plan[2].kind, PlannedEmailKind::AdminAlert);
        assert_eq!(plan[2].milestone.threshold, 3);
        assert_eq!(plan[3].kind, PlannedEmailKind::SubscriberCongrats);
        assert_eq!(plan[3].milestone.threshold, 3);
    }

    #[test]
    fn plan_without_admin_address_only_congratulates() {
        let milestones = vec![milestone(5, "Silver", None)];

        let plan = notification_plan(None, "fan@example.com", &milestones);

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].kind, PlannedEmailKind::SubscriberCongrats);
        assert_eq!(plan[0].to, "fan@example.com");
    }

    #[test]
    fn badge_lookup_matches_keywords() {
        assert_eq!(badge_emoji("Bronze Tier"), "🥉");
        assert_eq!(badge_emoji("silver circle"), "🥈");
        assert_eq!(badge_emoji("GOLD CLUB"), "🥇");
        assert_eq!(badge_emoji("Platinum Insider"), "💎");
        assert_eq!(badge_emoji("Super Sharer"), "🏆");
    }

    #[test]
    fn reward_copy_defaults_without_type() {
        let m = milestone(10, "Gold", None);
        assert_eq!(reward_copy(&m), "Keep sharing to reach the next milestone!");
    }
}
