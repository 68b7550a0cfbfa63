use super::sendmail::send_email;
use crate::{
    models::{milestonemodel::ReferralMilestone, subscribermodel::Subscriber},
    service::milestone::{badge_emoji, reward_copy},
};

fn app_url() -> String {
    std::env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

pub async fn send_confirmation_email(
    to_email: &str,
    name: &str,
    token: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = "Confirm your subscription";
    let template_path = "src/mail/templates/Confirmation-email.html";
    let confirmation_link = format!("{}/api/newsletter/confirm/{}", app_url(), token);
    let placeholders = vec![
        ("{{name}}".to_string(), name.to_string()),
        ("{{confirmation_link}}".to_string(), confirmation_link),
    ];

    send_email(to_email, subject, template_path, &placeholders).await
}

pub async fn send_welcome_email(
    to_email: &str,
    name: &str,
    referral_link: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = "Welcome aboard!";
    let template_path = "src/mail/templates/Welcome-email.html";
    let placeholders = vec![
        ("{{name}}".to_string(), name.to_string()),
        ("{{referral_link}}".to_string(), referral_link.to_string()),
    ];

    send_email(to_email, subject, template_path, &placeholders).await
}

pub async fn send_milestone_admin_alert(
    admin_email: &str,
    referrer: &Subscriber,
    milestone: &ReferralMilestone,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = format!(
        "Milestone reached: {} hit {} referrals",
        referrer.email, milestone.threshold
    );
    let template_path = "src/mail/templates/Milestone-admin.html";
    let placeholders = vec![
        ("{{subscriber_email}}".to_string(), referrer.email.clone()),
        (
            "{{subscriber_name}}".to_string(),
            referrer.display_name().to_string(),
        ),
        ("{{milestone_name}}".to_string(), milestone.name.clone()),
        ("{{threshold}}".to_string(), milestone.threshold.to_string()),
        (
            "{{referral_count}}".to_string(),
            referrer.referral_count.to_string(),
        ),
    ];

    send_email(admin_email, &subject, template_path, &placeholders).await
}

pub async fn send_milestone_congrats(
    to_email: &str,
    name: &str,
    milestone: &ReferralMilestone,
) -> Result<(), Box<dyn std::error::Error>> {
    let emoji = badge_emoji(&milestone.name);
    let subject = format!("{} You've reached the {} milestone!", emoji, milestone.name);
    let template_path = "src/mail/templates/Milestone-congrats.html";
    let placeholders = vec![
        ("{{name}}".to_string(), name.to_string()),
        ("{{badge}}".to_string(), emoji.to_string()),
        ("{{milestone_name}}".to_string(), milestone.name.clone()),
        ("{{threshold}}".to_string(), milestone.threshold.to_string()),
        ("{{reward_copy}}".to_string(), reward_copy(milestone)),
    ];

    send_email(to_email, &subject, template_path, &placeholders).await
}
