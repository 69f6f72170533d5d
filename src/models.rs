//! Domain models

pub mod email_otp;
