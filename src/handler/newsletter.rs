use std::sync::Arc;

use axum::{
    extract::Path,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::{ContactListExt, SequenceExt, SignupPageExt, SubscriberExt},
    dtos::{FilterSubscriberDto, Response, SubscribeDto, SubscriberData, SubscriberResponseDto},
    error::{ErrorMessage, HttpError},
    mail::mails::{send_confirmation_email, send_welcome_email},
    models::subscribermodel::{Subscriber, SubscriberStatus},
    service::{
        captcha::verify_captcha,
        crm_sync::sync_subscriber,
        referral::{generate_referral_code, generate_referral_link},
    },
    AppState,
};

pub fn newsletter_handler() -> Router {
    Router::new()
        .route("/subscribe", post(subscribe))
        .route("/confirm/:token", get(confirm))
        .route("/unsubscribe/:token", get(unsubscribe))
}

pub async fn subscribe(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SubscribeDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if let Some(ref secret) = app_state.env.captcha_secret {
        verify_captcha(secret, body.captcha_token.as_deref().unwrap_or("")).await?;
    }

    // Idempotent re-subscribe handling before anything is written
    let existing = app_state
        .db_client
        .get_subscriber(None, Some(&body.email), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Some(subscriber) = existing {
        return match subscriber.status {
            SubscriberStatus::Pending => {
                if let Some(ref token) = subscriber.confirmation_token {
                    send_confirmation_email(&subscriber.email, subscriber.display_name(), token)
                        .await
                        .map_err(|e| HttpError::server_error(e.to_string()))?;
                }
                Ok(Json(Response {
                    status: "success",
                    message: "Confirmation email re-sent. Please check your inbox.".to_string(),
                })
                .into_response())
            }
            _ => Ok(Json(Response {
                status: "success",
                message: "You are already subscribed.".to_string(),
            })
            .into_response()),
        };
    }

    // Referral attribution is resolved at signup and immutable afterwards
    let mut referred_by: Option<uuid::Uuid> = None;
    if let Some(ref code) = body.referral_code {
        let referrer = app_state
            .db_client
            .get_subscriber(None, None, None, Some(code))
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .ok_or(HttpError::bad_request(
                ErrorMessage::InvalidReferralCode.to_string(),
            ))?;

        if referrer.email == body.email {
            return Err(HttpError::bad_request(ErrorMessage::SelfReferral.to_string()));
        }
        referred_by = Some(referrer.id);
    }

    let signup_list = match body.page_slug {
        Some(ref slug) => app_state
            .db_client
            .get_page_by_slug(slug, true)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .and_then(|page| page.list_id),
        None => None,
    };

    let confirmation_token = uuid::Uuid::new_v4().to_string();

    let subscriber = app_state
        .db_client
        .save_subscriber(
            body.email,
            body.name,
            confirmation_token.clone(),
            referred_by,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Page-specific list membership is a side effect of the signup, not a
    // reason to fail it
    if let Some(list_id) = signup_list {
        if let Err(e) = app_state
            .db_client
            .add_list_member(list_id, subscriber.id)
            .await
        {
            tracing::error!(
                "Failed to add {} to signup-page list {}: {}",
                subscriber.email,
                list_id,
                e
            );
        }
    }

    send_confirmation_email(
        &subscriber.email,
        subscriber.display_name(),
        &confirmation_token,
    )
    .await
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let filtered_subscriber = FilterSubscriberDto::filter_subscriber(&subscriber);

    Ok(Json(SubscriberResponseDto {
        status: "success".to_string(),
        data: SubscriberData {
            subscriber: filtered_subscriber,
        },
    })
    .into_response())
}

pub async fn confirm(
    Path(token): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let result = app_state
        .db_client
        .get_subscriber(None, None, Some(&token), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let subscriber = result.ok_or(HttpError::not_found(
        ErrorMessage::SubscriberNotFound.to_string(),
    ))?;

    if subscriber.status == SubscriberStatus::Active {
        return Ok(Redirect::to(&format!(
            "{}/confirmed?status=already",
            app_state.env.frontend_url
        )));
    }

    if subscriber.status == SubscriberStatus::Unsubscribed {
        return Err(HttpError::bad_request(
            "This subscription has been cancelled".to_string(),
        ));
    }

    // Guarded flip to active with a fresh referral code; collisions on the
    // code's unique index are retried with a new code
    let mut confirmed: Option<Subscriber> = None;
    for _ in 0..5 {
        let code = generate_referral_code();
        match app_state
            .db_client
            .confirm_subscriber(subscriber.id, &code)
            .await
        {
            Ok(row) => {
                confirmed = row;
                break;
            }
            Err(e) if is_unique_violation(&e) => continue,
            Err(e) => return Err(HttpError::server_error(e.to_string())),
        }
    }

    let subscriber = match confirmed {
        Some(subscriber) => subscriber,
        // The guarded UPDATE matched nothing: a concurrent confirmation won
        None => {
            return Ok(Redirect::to(&format!(
                "{}/confirmed?status=already",
                app_state.env.frontend_url
            )));
        }
    };

    // Everything below is best-effort. The subscriber is confirmed; a failed
    // side effect must never undo or mask that.
    if let Err(e) = app_state
        .db_client
        .enroll_in_active_sequences(subscriber.id)
        .await
    {
        tracing::error!(
            "Sequence enrollment failed for {}: {}",
            subscriber.email,
            e
        );
    }

    if let Err(e) = app_state.db_client.auto_assign_lists(subscriber.id).await {
        tracing::error!("List auto-assignment failed for {}: {}", subscriber.email, e);
    }

    if let (Some(api_url), Some(api_key)) =
        (&app_state.env.crm_api_url, &app_state.env.crm_api_key)
    {
        if let Err(e) = sync_subscriber(api_url, api_key, &subscriber).await {
            tracing::error!("Contact sync failed for {}: {}", subscriber.email, e);
        }
    }

    let referral_link = generate_referral_link(
        &app_state.env.frontend_url,
        subscriber.referral_code.as_deref().unwrap_or_default(),
    );

    if let Err(e) =
        send_welcome_email(&subscriber.email, subscriber.display_name(), &referral_link).await
    {
        tracing::error!("Failed to send welcome email to {}: {}", subscriber.email, e);
    }

    if let Some(referrer_id) = subscriber.referred_by {
        match app_state
            .milestone_service
            .handle_confirmed_referral(referrer_id)
            .await
        {
            Ok(outcome) => {
                if !outcome.newly_achieved.is_empty() {
                    tracing::info!(
                        "Referrer {} crossed {} milestone(s) at count {}",
                        referrer_id,
                        outcome.newly_achieved.len(),
                        outcome.new_count
                    );
                }
            }
            Err(e) => {
                tracing::error!("Referral processing failed for referrer {}: {}", referrer_id, e);
            }
        }
    }

    Ok(Redirect::to(&format!(
        "{}/confirmed",
        app_state.env.frontend_url
    )))
}

pub async fn unsubscribe(
    Path(token): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let result = app_state
        .db_client
        .mark_unsubscribed(&token)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    result.ok_or(HttpError::not_found(
        ErrorMessage::SubscriberNotFound.to_string(),
    ))?;

    Ok(Redirect::to(&format!(
        "{}/unsubscribed",
        app_state.env.frontend_url
    )))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
