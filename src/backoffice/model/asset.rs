use serde::{Deserialize, Serialize};

/// Platform name used for assets without multi-chain support
pub const NATIVE_PLATFORM: &str = "native";

/// Deposit address on one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformAddress {
    pub platform: String,
    pub address: String,
}

impl PlatformAddress {
    pub fn native(address: impl Into<String>) -> Self {
        Self {
            platform: NATIVE_PLATFORM.to_string(),
            address: address.into(),
        }
    }

    /// Parse `platform=address`; a bare address is taken as native
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("address must not be empty".to_string());
        }
        match s.split_once('=') {
            Some((platform, address)) if !platform.trim().is_empty() && !address.trim().is_empty() => {
                Ok(Self {
                    platform: platform.trim().to_string(),
                    address: address.trim().to_string(),
                })
            }
            Some(_) => Err(format!("expected platform=address, got '{}'", s)),
            None => Ok(Self::native(s)),
        }
    }
}

/// Tradable crypto asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub crypto_id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Buy rate in naira per USD
    #[serde(default)]
    pub ngn_rate: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub has_platforms: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub platform_addresses: Vec<PlatformAddress>,
}

impl Asset {
    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }

    pub fn networks(&self) -> String {
        self.platform_addresses
            .iter()
            .map(|p| p.platform.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// `POST /assets` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub crypto_id: String,
    pub name: String,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub has_platforms: bool,
    pub is_active: bool,
    pub platform_addresses: Vec<PlatformAddress>,
}

/// `PATCH /assets/{id}` body; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ngn_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub platform_addresses: Vec<PlatformAddress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_address_parsing() {
        assert_eq!(
            PlatformAddress::parse("tron=TQ1").unwrap(),
            PlatformAddress {
                platform: "tron".into(),
                address: "TQ1".into()
            }
        );
        assert_eq!(PlatformAddress::parse("bc1q").unwrap(), PlatformAddress::native("bc1q"));
        assert!(PlatformAddress::parse("=x").is_err());
        assert!(PlatformAddress::parse(" ").is_err());
    }

    #[test]
    fn test_asset_defaults() {
        let asset: Asset = serde_json::from_str(
            r#"{"_id":"a1","name":"Tether","symbol":"usdt","ngnRate":1500,
                "platformAddresses":[{"platform":"tron","address":"T1"},{"platform":"ethereum","address":"0x1"}]}"#,
        )
        .unwrap();
        assert!(asset.is_active());
        assert_eq!(asset.networks(), "tron, ethereum");
        assert_eq!(asset.ngn_rate, 1500.0);
    }

    #[test]
    fn test_asset_update_omits_unset_fields() {
        let body = serde_json::to_value(AssetUpdate {
            ngn_rate: Some(1600.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "ngnRate": 1600.0 }));
    }
}
