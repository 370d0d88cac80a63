//! Dashboard settings store.

use serde::{Deserialize, Serialize};

/// Notification preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub email: bool,
    pub slack: bool,
    pub bid_alerts: bool,
    pub budget_alerts: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            slack: false,
            bid_alerts: true,
            budget_alerts: true,
        }
    }
}

/// Bidding strategy preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidStrategy {
    Conservative,
    Balanced,
    Aggressive,
}

/// Automated bidding preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiddingSettings {
    /// Ceiling for a single bid, in currency units.
    pub max_bid_amount: f64,
    pub auto_bidding: bool,
    pub strategy: BidStrategy,
}

impl Default for BiddingSettings {
    fn default() -> Self {
        Self {
            max_bid_amount: 1_000.0,
            auto_bidding: true,
            strategy: BidStrategy::Balanced,
        }
    }
}

/// Account security preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    pub two_factor_auth: bool,
    pub api_key_expiration_days: u32,
    pub ip_whitelist: Vec<String>,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            two_factor_auth: false,
            api_key_expiration_days: 30,
            ip_whitelist: Vec::new(),
        }
    }
}

/// Payment method on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    BankTransfer,
    Invoice,
}

/// Billing preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingSettings {
    pub auto_recharge: bool,
    /// Balance threshold that triggers a recharge, in currency units.
    pub minimum_balance: f64,
    pub payment_method: PaymentMethod,
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self {
            auto_recharge: true,
            minimum_balance: 1_000.0,
            payment_method: PaymentMethod::CreditCard,
        }
    }
}

/// All dashboard settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub notifications: NotificationSettings,
    pub bidding: BiddingSettings,
    pub security: SecuritySettings,
    pub billing: BillingSettings,
}

/// Section-wise partial update of [`DashboardSettings`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub notifications: Option<NotificationSettings>,
    pub bidding: Option<BiddingSettings>,
    pub security: Option<SecuritySettings>,
    pub billing: Option<BillingSettings>,
}

impl DashboardSettings {
    /// Replace the sections present in the patch, leaving the rest untouched.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(notifications) = patch.notifications {
            self.notifications = notifications;
        }
        if let Some(bidding) = patch.bidding {
            self.bidding = bidding;
        }
        if let Some(security) = patch.security {
            self.security = security;
        }
        if let Some(billing) = patch.billing {
            self.billing = billing;
        }
    }
}
