use thiserror::Error;

use crate::models::category::TicketCategory;

/// Unit price and display color for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySchedule {
    pub price: f64,
    pub color: String,
}

/// Immutable price schedule injected into both ticket pipelines.
///
/// Construction enforces that every category carries exactly one price and
/// one color, so lookups on a built table are total.
#[derive(Debug, Clone)]
pub struct PriceTable {
    schedule: [CategorySchedule; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceTableError {
    #[error("No schedule entry for category '{0}'")]
    MissingCategory(TicketCategory),

    #[error("Duplicate schedule entry for category '{0}'")]
    DuplicateCategory(TicketCategory),

    #[error("Invalid price for category '{0}'")]
    InvalidPrice(TicketCategory),
}

impl PriceTable {
    pub fn new<I, S>(entries: I) -> Result<Self, PriceTableError>
    where
        I: IntoIterator<Item = (TicketCategory, f64, S)>,
        S: Into<String>,
    {
        let mut slots: [Option<CategorySchedule>; 4] = [None, None, None, None];

        for (category, price, color) in entries {
            if slots[category.index()].is_some() {
                return Err(PriceTableError::DuplicateCategory(category));
            }
            if !price.is_finite() || price < 0.0 {
                return Err(PriceTableError::InvalidPrice(category));
            }
            slots[category.index()] = Some(CategorySchedule {
                price,
                color: color.into(),
            });
        }

        let mut schedule = Vec::with_capacity(4);
        for category in TicketCategory::ALL {
            match slots[category.index()].take() {
                Some(entry) => schedule.push(entry),
                None => return Err(PriceTableError::MissingCategory(category)),
            }
        }

        let schedule: [CategorySchedule; 4] = schedule
            .try_into()
            .map_err(|_| PriceTableError::MissingCategory(TicketCategory::Adult))?;

        Ok(Self { schedule })
    }

    pub fn price_of(&self, category: TicketCategory) -> f64 {
        self.schedule[category.index()].price
    }

    /// Hex display color (`#RRGGBB`) used for the ticket artwork.
    pub fn color_of(&self, category: TicketCategory) -> &str {
        &self.schedule[category.index()].color
    }
}

impl Default for PriceTable {
    /// The configured zoo schedule: gate prices in CHF and the banner color
    /// per category.
    fn default() -> Self {
        Self {
            schedule: [
                CategorySchedule {
                    price: 30.0,
                    color: "#10B981".to_string(),
                },
                CategorySchedule {
                    price: 15.0,
                    color: "#8B5CF6".to_string(),
                },
                CategorySchedule {
                    price: 20.0,
                    color: "#3B82F6".to_string(),
                },
                CategorySchedule {
                    price: 75.0,
                    color: "#EC4899".to_string(),
                },
            ],
        }
    }
}
