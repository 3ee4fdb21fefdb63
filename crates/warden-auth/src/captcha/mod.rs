//! Captcha challenges guarding the login endpoint.

pub mod service;

pub use service::{CacheCaptchaService, CaptchaChallenge, CaptchaService};
