pub mod abtest;
pub mod captcha;
pub mod crm_sync;
pub mod error;
pub mod milestone;
pub mod referral;
