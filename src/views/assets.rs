//! Tradable assets

use crate::backoffice::model::{Asset, AssetUpdate, NATIVE_PLATFORM, NewAsset, PlatformAddress};
use crate::format::format_rate;
use crate::state::AppState;

use super::{Table, ViewResult, cell};

/// Fields for a new asset as entered by the operator
#[derive(Debug, Clone, Default)]
pub struct AssetDraft {
    pub crypto_id: String,
    pub name: String,
    pub symbol: String,
    pub image: Option<String>,
    pub rate: Option<f64>,
    pub vip_rate: Option<f64>,
    pub description: Option<String>,
    /// `platform=address` entries, or one bare native address
    pub addresses: Vec<PlatformAddress>,
}

impl AssetDraft {
    /// Request body; multi-network assets carry named platforms, others one native address
    pub fn into_request(self) -> anyhow::Result<NewAsset> {
        if self.crypto_id.trim().is_empty() || self.symbol.trim().is_empty() {
            anyhow::bail!("Asset id and symbol are required");
        }
        if self.addresses.is_empty() {
            anyhow::bail!("At least one deposit address is required");
        }
        let has_platforms = self.addresses.iter().any(|a| a.platform != NATIVE_PLATFORM);

        Ok(NewAsset {
            crypto_id: self.crypto_id.trim().to_string(),
            name: self.name.trim().to_string(),
            symbol: self.symbol.trim().to_lowercase(),
            image: self.image,
            rate: self.rate.filter(|r| *r > 0.0),
            vip_rate: self.vip_rate.filter(|r| *r > 0.0),
            description: self.description,
            has_platforms,
            is_active: true,
            platform_addresses: self.addresses,
        })
    }
}

pub fn assets_table(assets: &[Asset]) -> Table {
    let mut table = Table::new(["ID", "Asset", "Symbol", "NGN Rate", "Networks", "Active"]);
    for asset in assets {
        table.row([
            asset.id.clone(),
            asset.name.clone(),
            asset.symbol.to_uppercase(),
            format_rate(asset.ngn_rate),
            cell(Some(asset.networks())),
            if asset.is_active() { "yes" } else { "no" }.to_string(),
        ]);
    }
    table
}

/// Assets whose name or symbol contains `search`, case-insensitively
pub fn filter_assets<'a>(assets: &'a [Asset], search: Option<&str>) -> Vec<&'a Asset> {
    let needle = search.map(|s| s.trim().to_lowercase()).unwrap_or_default();
    assets
        .iter()
        .filter(|a| {
            needle.is_empty()
                || a.name.to_lowercase().contains(&needle)
                || a.symbol.to_lowercase().contains(&needle)
        })
        .collect()
}

pub async fn list(state: &AppState, search: Option<&str>) -> ViewResult {
    let assets = state.backoffice().list_assets().await.into_required()?;
    let shown: Vec<Asset> = filter_assets(&assets, search).into_iter().cloned().collect();
    Ok(assets_table(&shown).render("No assets found"))
}

pub async fn add(state: &AppState, draft: AssetDraft) -> ViewResult {
    let request = draft.into_request()?;
    state.backoffice().add_asset(&request).await.into_result()?;
    Ok(String::new())
}

pub async fn update(state: &AppState, id: &str, update: AssetUpdate) -> ViewResult {
    state
        .backoffice()
        .update_asset(id, &update)
        .await
        .into_result()?;
    Ok(String::new())
}

pub async fn remove(state: &AppState, id: &str) -> ViewResult {
    state.backoffice().remove_asset(id).await.into_result()?;
    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{logged_in_state, ok};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer};

    fn assets() -> Vec<Asset> {
        serde_json::from_value(serde_json::json!([
            { "_id": "a1", "name": "Bitcoin", "symbol": "btc", "ngnRate": 1480.756 },
            { "_id": "a2", "name": "Tether", "symbol": "usdt", "ngnRate": 1500, "isActive": false }
        ]))
        .unwrap()
    }

    #[test]
    fn test_filter_by_name_or_symbol() {
        let all = assets();
        assert_eq!(filter_assets(&all, None).len(), 2);
        assert_eq!(filter_assets(&all, Some("USDT"))[0].id, "a2");
        assert_eq!(filter_assets(&all, Some("coin"))[0].id, "a1");
        assert!(filter_assets(&all, Some("eth")).is_empty());
    }

    #[test]
    fn test_table_rows() {
        let rendered = assets_table(&assets()).render("");
        assert!(rendered.contains("1,480.75"));
        assert!(rendered.contains("USDT"));
    }

    #[test]
    fn test_draft_validation() {
        assert!(AssetDraft::default().into_request().is_err());

        let native = AssetDraft {
            crypto_id: "bitcoin".into(),
            name: "Bitcoin".into(),
            symbol: "BTC".into(),
            rate: Some(0.0),
            addresses: vec![PlatformAddress::native("bc1q")],
            ..Default::default()
        }
        .into_request()
        .unwrap();
        assert!(!native.has_platforms);
        assert_eq!(native.symbol, "btc");
        assert!(native.rate.is_none());
    }

    #[tokio::test]
    async fn test_add_posts_native_asset() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/assets"))
            .and(body_json(serde_json::json!({
                "cryptoId": "bitcoin",
                "name": "Bitcoin",
                "symbol": "btc",
                "rate": 1450.0,
                "hasPlatforms": false,
                "isActive": true,
                "platformAddresses": [{ "platform": "native", "address": "bc1q" }]
            })))
            .respond_with(ok(serde_json::Value::Null))
            .expect(1)
            .mount(&server)
            .await;

        let (state, _) = logged_in_state(&server);
        let draft = AssetDraft {
            crypto_id: "bitcoin".into(),
            name: "Bitcoin".into(),
            symbol: "btc".into(),
            rate: Some(1450.0),
            addresses: vec![PlatformAddress::native("bc1q")],
            ..Default::default()
        };
        add(&state, draft).await.unwrap();
    }
}
