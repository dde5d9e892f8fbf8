//! Marketplace models scraped from public profile pages

use serde::{Deserialize, Serialize};

/// Kind of a lot category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryType {
    /// Regular lots that can be raised
    Lot,
    /// In-game currency ("chips") offers
    Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub game_id: Option<u64>,
    pub title: String,
    pub edit_lots_link: String,
    pub public_link: String,
    pub kind: CategoryType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub category_id: u64,
    pub game_id: Option<u64>,
    pub id: u64,
    pub server: Option<String>,
    pub title: String,
    pub price: f64,
}

/// Categories of a seller together with their lots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserLotsInfo {
    pub categories: Vec<Category>,
    pub lots: Vec<Lot>,
}

impl UserLotsInfo {
    /// Lots that belong to the given category
    pub fn lots_in(&self, category_id: u64) -> impl Iterator<Item = &Lot> {
        self.lots.iter().filter(move |lot| lot.category_id == category_id)
    }
}
