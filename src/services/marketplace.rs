//! Marketplace scraping service
//!
//! Fetches a seller's public profile page without authentication and
//! extracts lot categories and lots from the server-rendered HTML.
//! Parsing is kept separate from fetching so it can be tested offline
//! against saved pages.

use std::time::Duration;
use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::config::MarketplaceConfig;
use crate::models::marketplace::{Category, CategoryType, Lot, UserLotsInfo};
use crate::utils::errors::{LotPilotError, Result, ScraperError, ScraperResult};

/// Marker in a category link for in-game currency offers, e.g. `/chips/125/`
const CURRENCY_LINK_MARKER: &str = "chips";

/// HTTP client for public marketplace pages
#[derive(Debug, Clone)]
pub struct MarketplaceService {
    client: Client,
    base_url: Url,
    default_timeout: Duration,
}

impl MarketplaceService {
    /// Create a new MarketplaceService instance
    pub fn new(config: &MarketplaceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| LotPilotError::Scraper(ScraperError::Request(e.to_string())))?;

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
            default_timeout: config.timeout(),
        })
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Public profile URL of a user
    pub fn user_url(&self, user_id: u64) -> ScraperResult<Url> {
        self.base_url
            .join(&format!("users/{}/", user_id))
            .map_err(|e| ScraperError::Request(e.to_string()))
    }

    /// Get the lot categories of a user.
    ///
    /// Currency categories are skipped unless `include_currency` is set,
    /// since their lots cannot be raised.
    pub async fn fetch_user_categories(
        &self,
        user_id: u64,
        include_currency: bool,
        timeout: Duration,
    ) -> ScraperResult<Vec<Category>> {
        let html = self.fetch_user_page(user_id, timeout).await?;
        let categories = parse_user_categories(&html, include_currency)?;

        debug!(user_id = user_id, categories = categories.len(), "Parsed user categories");
        Ok(categories)
    }

    /// Get the lot categories of a user together with the lots in them
    pub async fn fetch_user_lots_info(
        &self,
        user_id: u64,
        include_currency: bool,
        timeout: Duration,
    ) -> ScraperResult<UserLotsInfo> {
        let html = self.fetch_user_page(user_id, timeout).await?;
        let info = parse_user_lots_info(&html, include_currency)?;

        debug!(user_id = user_id, categories = info.categories.len(), lots = info.lots.len(),
               "Parsed user lots");
        Ok(info)
    }

    async fn fetch_user_page(&self, user_id: u64, timeout: Duration) -> ScraperResult<String> {
        let url = self.user_url(user_id)?;

        debug!(user_id = user_id, url = %url, "Fetching user page");

        let response = self.client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScraperError::Timeout
                } else {
                    ScraperError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ScraperError::UserNotFound { user_id });
        }
        if !status.is_success() {
            warn!(user_id = user_id, status = status.as_u16(), "Marketplace returned an error status");
            return Err(ScraperError::FetchFailed { status: status.as_u16() });
        }

        response.text().await.map_err(|e| ScraperError::Request(e.to_string()))
    }
}

fn selector(css: &str) -> ScraperResult<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::MalformedPage(format!("bad selector {}: {:?}", css, e)))
}

/// Extract categories from a user page
pub fn parse_user_categories(html: &str, include_currency: bool) -> ScraperResult<Vec<Category>> {
    let document = Html::parse_document(html);
    let title_selector = selector("div.offer-list-title")?;
    let link_selector = selector("a")?;

    let mut categories = Vec::new();
    for title in document.select(&title_selector) {
        let Some(link) = title.select(&link_selector).next() else {
            continue;
        };
        if let Some(category) = parse_category(link, include_currency)? {
            categories.push(category);
        }
    }

    Ok(categories)
}

/// Extract categories and their lots from a user page
pub fn parse_user_lots_info(html: &str, include_currency: bool) -> ScraperResult<UserLotsInfo> {
    let document = Html::parse_document(html);
    let container_selector = selector("div.offer-list-title-container")?;
    let title_selector = selector("div.offer-list-title a")?;
    let lot_selector = selector("a.tc-item")?;

    let mut info = UserLotsInfo::default();
    for container in document.select(&container_selector) {
        let Some(link) = container.select(&title_selector).next() else {
            continue;
        };
        let Some(category) = parse_category(link, include_currency)? else {
            continue;
        };

        // Lots are siblings of the title container inside the offer block
        let block = container.parent().and_then(ElementRef::wrap).unwrap_or(container);
        for lot_link in block.select(&lot_selector) {
            info.lots.push(parse_lot(lot_link, category.id)?);
        }

        info.categories.push(category);
    }

    Ok(info)
}

fn parse_category(link: ElementRef<'_>, include_currency: bool) -> ScraperResult<Option<Category>> {
    let public_link = link
        .value()
        .attr("href")
        .ok_or_else(|| ScraperError::MalformedPage("category link without href".to_string()))?;

    let kind = if public_link.contains(CURRENCY_LINK_MARKER) {
        if !include_currency {
            return Ok(None);
        }
        CategoryType::Currency
    } else {
        CategoryType::Lot
    };

    Ok(Some(Category {
        id: category_id_from_link(public_link)?,
        game_id: None,
        title: element_text(link),
        edit_lots_link: format!("{}trade", public_link),
        public_link: public_link.to_string(),
        kind,
    }))
}

fn parse_lot(link: ElementRef<'_>, category_id: u64) -> ScraperResult<Lot> {
    let href = link
        .value()
        .attr("href")
        .ok_or_else(|| ScraperError::MalformedPage("lot link without href".to_string()))?;

    let id = href
        .split("id=")
        .nth(1)
        .and_then(|rest| rest.split('&').next())
        .and_then(|id| id.parse::<u64>().ok())
        .ok_or_else(|| ScraperError::MalformedPage(format!("no lot id in {}", href)))?;

    let server = link
        .select(&selector("div.tc-server")?)
        .next()
        .map(element_text);

    let title = link
        .select(&selector("div.tc-desc-text")?)
        .next()
        .map(element_text)
        .ok_or_else(|| ScraperError::MalformedPage(format!("lot {} has no description", id)))?;

    let price = link
        .select(&selector("div.tc-price")?)
        .next()
        .and_then(|price| price.value().attr("data-s"))
        .and_then(|price| price.trim().parse::<f64>().ok())
        .ok_or_else(|| ScraperError::MalformedPage(format!("lot {} has no price", id)))?;

    Ok(Lot {
        category_id,
        game_id: None,
        id,
        server,
        title,
        price,
    })
}

/// Category id is the last path segment: `https://host/lots/210/` -> 210
fn category_id_from_link(link: &str) -> ScraperResult<u64> {
    link.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|id| id.parse::<u64>().ok())
        .ok_or_else(|| ScraperError::MalformedPage(format!("no category id in {}", link)))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const USER_PAGE: &str = r#"
        <html><body>
        <div class="offer">
            <div class="offer-list-title-container">
                <div class="offer-list-title">
                    <h3><a href="https://funpay.com/lots/210/">Genshin Impact, Accounts</a></h3>
                </div>
            </div>
            <div class="tc table-hover">
                <a href="https://funpay.com/lots/offer?id=1001" class="tc-item">
                    <div class="tc-server">Europe</div>
                    <div class="tc-desc"><div class="tc-desc-text">AR 55 account</div></div>
                    <div class="tc-price" data-s="12.5"><div>12.5 €</div></div>
                </a>
                <a href="https://funpay.com/lots/offer?id=1002" class="tc-item">
                    <div class="tc-desc"><div class="tc-desc-text">Starter account</div></div>
                    <div class="tc-price" data-s="3"><div>3 €</div></div>
                </a>
            </div>
        </div>
        <div class="offer">
            <div class="offer-list-title-container">
                <div class="offer-list-title">
                    <h3><a href="https://funpay.com/chips/125/">Black Desert Mobile, Silver</a></h3>
                </div>
            </div>
            <div class="tc table-hover">
                <a href="https://funpay.com/chips/offer?id=2001" class="tc-item">
                    <div class="tc-server">Asia</div>
                    <div class="tc-desc-text">1kk silver</div>
                    <div class="tc-price" data-s="0.4"></div>
                </a>
            </div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_categories_skip_currency_by_default() {
        let categories = parse_user_categories(USER_PAGE, false).unwrap();

        assert_eq!(categories.len(), 1);
        let category = &categories[0];
        assert_eq!(category.id, 210);
        assert_eq!(category.title, "Genshin Impact, Accounts");
        assert_eq!(category.kind, CategoryType::Lot);
        assert_eq!(category.edit_lots_link, "https://funpay.com/lots/210/trade");
        assert!(category.game_id.is_none());
    }

    #[test]
    fn test_categories_with_currency() {
        let categories = parse_user_categories(USER_PAGE, true).unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].id, 125);
        assert_eq!(categories[1].kind, CategoryType::Currency);
    }

    #[test]
    fn test_lots_info() {
        let info = parse_user_lots_info(USER_PAGE, false).unwrap();

        assert_eq!(info.categories.len(), 1);
        assert_eq!(info.lots.len(), 2);

        let first = &info.lots[0];
        assert_eq!(first.id, 1001);
        assert_eq!(first.category_id, 210);
        assert_eq!(first.server.as_deref(), Some("Europe"));
        assert_eq!(first.title, "AR 55 account");
        assert_eq!(first.price, 12.5);

        assert!(info.lots[1].server.is_none());
        assert_eq!(info.lots_in(210).count(), 2);
    }

    #[test]
    fn test_lots_info_with_currency() {
        let info = parse_user_lots_info(USER_PAGE, true).unwrap();

        assert_eq!(info.categories.len(), 2);
        let silver: Vec<_> = info.lots_in(125).collect();
        assert_eq!(silver.len(), 1);
        assert_eq!(silver[0].id, 2001);
        assert_eq!(silver[0].price, 0.4);
    }

    #[test]
    fn test_empty_page() {
        assert!(parse_user_categories("<html></html>", true).unwrap().is_empty());
        assert_eq!(parse_user_lots_info("<html></html>", true).unwrap(), UserLotsInfo::default());
    }

    #[test]
    fn test_lot_without_price_is_malformed() {
        let html = r#"
            <div><div class="offer-list-title-container">
                <div class="offer-list-title"><a href="https://funpay.com/lots/7/">X</a></div>
            </div>
            <a href="https://funpay.com/lots/offer?id=5" class="tc-item">
                <div class="tc-desc-text">no price</div>
            </a></div>
        "#;

        assert_matches!(parse_user_lots_info(html, false), Err(ScraperError::MalformedPage(_)));
    }

    #[test]
    fn test_category_id_from_link() {
        assert_eq!(category_id_from_link("https://funpay.com/lots/210/").unwrap(), 210);
        assert_eq!(category_id_from_link("/chips/125").unwrap(), 125);
        assert!(category_id_from_link("https://funpay.com/lots/").is_err());
    }

    #[test]
    fn test_user_url() {
        let service = MarketplaceService::new(&crate::config::Settings::default().marketplace).unwrap();
        assert_eq!(service.user_url(42).unwrap().as_str(), "https://funpay.com/users/42/");
    }
}
