pub mod campaigns;
pub mod contact_lists;
pub mod milestones;
pub mod newsletter;
pub mod referral;
pub mod sequences;
pub mod signup_pages;
pub mod subscribers;
