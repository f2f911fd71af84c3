//! Site-wide branding and contact settings.

use serde::{Deserialize, Serialize};

use storefront_core::error::AppError;

/// Storefront branding and contact details shown across public pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Store name shown in the header and page titles.
    pub brand_name: String,
    /// Short tagline under the brand name.
    pub brand_description: String,
    /// Absolute URL of the logo image.
    pub logo_url: String,
    /// Customer contact address.
    pub email_address: String,
    /// Phone number for customer support.
    pub helpline_number: String,
    /// WhatsApp contact number.
    pub whatsapp_number: String,
    /// Facebook page link.
    pub facebook_url: String,
    /// Instagram profile link.
    pub instagram_url: String,
    /// TikTok profile link.
    pub tiktok_url: String,
    /// Snapchat profile link.
    pub snapchat_url: String,
}

impl SiteSettings {
    /// Checks the fields an admin may submit.
    ///
    /// Every field may be left empty. Links must be absolute `http(s)` URLs
    /// and the email address must contain `@`.
    pub fn validate(&self) -> Result<(), AppError> {
        let links = [
            ("logo_url", &self.logo_url),
            ("facebook_url", &self.facebook_url),
            ("instagram_url", &self.instagram_url),
            ("tiktok_url", &self.tiktok_url),
            ("snapchat_url", &self.snapchat_url),
        ];
        for (field, value) in links {
            if !value.is_empty() && !(value.starts_with("https://") || value.starts_with("http://")) {
                return Err(AppError::validation(format!(
                    "{field} must be an absolute http(s) URL"
                )));
            }
        }

        if !self.email_address.is_empty() && !self.email_address.contains('@') {
            return Err(AppError::validation("email_address is not an email address"));
        }

        Ok(())
    }
}
