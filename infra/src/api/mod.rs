//! REST backend client module
//!
//! Talks to the two OTP endpoints of the FINT backend:
//! - `POST /otp/verify-otp/{email}` with `{ "otp": "..." }`
//! - `POST /otp/resend-otp` with `{ "email": "..." }`

mod http_client;

pub use http_client::HttpOtpApi;
