pub mod datetime;
pub mod member_ids;
pub mod lifecycle;
pub mod payments;
pub mod registration;
pub mod attendance;
pub mod validate;
pub mod referral;
