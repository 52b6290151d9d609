//! OTP email rendering

use askama::Template;
use platform::mail::OutgoingMail;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{email::Email, otp_code::OtpCode};
use crate::error::AuthResult;

#[derive(Template)]
#[template(path = "email/otp_code.html")]
struct OtpCodeEmailHtml<'a> {
    code: &'a str,
    ttl_minutes: u64,
}

#[derive(Template)]
#[template(path = "email/otp_code.txt")]
struct OtpCodeEmailText<'a> {
    code: &'a str,
    ttl_minutes: u64,
}

/// Render the login code email for `to`
pub fn build_otp_mail(to: &Email, code: &OtpCode, config: &AuthConfig) -> AuthResult<OutgoingMail> {
    let ttl_minutes = config.otp_ttl_minutes();
    let code = code.as_str();

    Ok(OutgoingMail {
        to: to.as_str().to_string(),
        subject: config.otp_email_subject.clone(),
        text_body: OtpCodeEmailText { code, ttl_minutes }.render()?,
        html_body: OtpCodeEmailHtml { code, ttl_minutes }.render()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_contains_code_and_validity() {
        let to = Email::new("seller@example.com").unwrap();
        let code = OtpCode::from_digits("482913");
        let mail = build_otp_mail(&to, &code, &AuthConfig::default()).unwrap();

        assert_eq!(mail.to, "seller@example.com");
        assert_eq!(mail.subject, "Your OTP for Login");
        for body in [&mail.text_body, &mail.html_body] {
            assert!(body.contains("482913"));
            assert!(body.contains("10 minutes"));
        }
    }
}
