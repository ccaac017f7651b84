//! Two-factor provisioning material generated at registration.
//!
//! A TOTP secret and a scannable QR code are issued exactly once when an
//! account is created. No route currently verifies a code during login;
//! see DESIGN.md for the open question around enforcing this.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use qrcode::{render::svg, QrCode};
use totp_rs::{Algorithm, Secret, TOTP};

use crate::config::TOTP_ISSUER;
use crate::errors::{AppError, AppResult};

/// Provisioning material returned to the caller once at registration.
#[derive(Clone)]
pub struct TwoFactorSetup {
    /// Base32-encoded TOTP secret, persisted with the user
    pub secret: String,
    /// otpauth:// provisioning URI encoded by the QR code
    pub otpauth_url: String,
    /// QR code as an SVG data URL, ready for an <img> tag
    pub qr_code: String,
}

impl std::fmt::Debug for TwoFactorSetup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwoFactorSetup")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl TwoFactorSetup {
    /// Generate a fresh secret and provisioning QR for the given account.
    pub fn generate(account_email: &str) -> AppResult<Self> {
        let raw = Secret::generate_secret();

        let Secret::Encoded(secret) = raw.to_encoded() else {
            return Err(AppError::internal("TOTP secret encoding failed"));
        };

        let totp = TOTP::new(
            Algorithm::SHA1,
            6,
            1,
            30,
            raw.to_bytes()
                .map_err(|e| AppError::internal(format!("TOTP secret invalid: {:?}", e)))?,
            Some(TOTP_ISSUER.to_string()),
            account_email.to_string(),
        )
        .map_err(|e| AppError::internal(format!("TOTP setup failed: {}", e)))?;

        let otpauth_url = totp.get_url();
        let qr_code = render_qr_data_url(&otpauth_url)?;

        Ok(Self {
            secret,
            otpauth_url,
            qr_code,
        })
    }
}

/// Render a string as a QR code SVG and wrap it in a data URL.
fn render_qr_data_url(content: &str) -> AppResult<String> {
    let image = QrCode::new(content)
        .map_err(|e| AppError::internal(format!("QR generation failed: {}", e)))?
        .render::<svg::Color>()
        .min_dimensions(256, 256)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#FFFFFF"))
        .build();

    Ok(format!(
        "data:image/svg+xml;base64,{}",
        BASE64.encode(image.as_bytes())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_distinct_secrets() {
        let a = TwoFactorSetup::generate("one@example.com").unwrap();
        let b = TwoFactorSetup::generate("one@example.com").unwrap();
        assert_ne!(a.secret, b.secret);
    }

    #[test]
    fn otpauth_url_names_issuer_and_account() {
        let setup = TwoFactorSetup::generate("user@example.com").unwrap();
        assert!(setup.otpauth_url.starts_with("otpauth://totp/"));
        assert!(setup.otpauth_url.contains("user%40example.com")
            || setup.otpauth_url.contains("user@example.com"));
        assert!(setup.otpauth_url.contains("GMCA2"));
    }

    #[test]
    fn qr_code_is_svg_data_url() {
        let setup = TwoFactorSetup::generate("user@example.com").unwrap();
        assert!(setup.qr_code.starts_with("data:image/svg+xml;base64,"));
    }
}
