use time::OffsetDateTime;

/// Culinary season, derived from the calendar month. Kept as an explicit
/// engine input so scoring stays deterministic under test.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

/// Seasonal produce grouped by category with the weight each category
/// contributes to the seasonal sub-score.
pub(crate) struct SeasonalCategory {
    pub weight: f64,
    pub ingredients: &'static [&'static str],
}

impl Season {
    /// Season for the current UTC month.
    pub fn current() -> Self {
        Self::from_month(u8::from(OffsetDateTime::now_utc().month()))
    }

    /// March-May spring, June-August summer, September-November fall,
    /// everything else winter.
    pub fn from_month(month: u8) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }

    pub(crate) fn categories(&self) -> [SeasonalCategory; 3] {
        let (vegetables, fruits, herbs): (
            &'static [&'static str],
            &'static [&'static str],
            &'static [&'static str],
        ) = match self {
            Season::Spring => (
                &[
                    "asparagus",
                    "peas",
                    "radishes",
                    "spinach",
                    "artichokes",
                    "fava beans",
                    "green beans",
                    "lettuce",
                    "spring onions",
                    "watercress",
                ],
                &["strawberries", "rhubarb", "apricots", "cherries", "pineapple"],
                &["mint", "parsley", "chives", "dill", "basil"],
            ),
            Season::Summer => (
                &[
                    "tomatoes",
                    "corn",
                    "zucchini",
                    "eggplant",
                    "bell peppers",
                    "cucumbers",
                    "green beans",
                    "okra",
                    "summer squash",
                ],
                &[
                    "berries",
                    "peaches",
                    "watermelon",
                    "cantaloupe",
                    "plums",
                    "nectarines",
                    "cherries",
                ],
                &["basil", "oregano", "thyme", "rosemary", "sage"],
            ),
            Season::Fall => (
                &[
                    "pumpkin",
                    "squash",
                    "sweet potatoes",
                    "brussels sprouts",
                    "cauliflower",
                    "broccoli",
                    "kale",
                    "cabbage",
                    "turnips",
                    "parsnips",
                ],
                &[
                    "apples",
                    "pears",
                    "cranberries",
                    "pomegranates",
                    "persimmons",
                    "quince",
                ],
                &["sage", "rosemary", "thyme", "parsley"],
            ),
            Season::Winter => (
                &[
                    "citrus",
                    "kale",
                    "brussels sprouts",
                    "root vegetables",
                    "winter squash",
                    "cabbage",
                    "leeks",
                    "celery root",
                    "beets",
                    "carrots",
                ],
                &["citrus", "apples", "pears", "pomegranates", "kiwi"],
                &["rosemary", "thyme", "sage", "bay leaves"],
            ),
        };

        [
            SeasonalCategory {
                weight: 0.5,
                ingredients: vegetables,
            },
            SeasonalCategory {
                weight: 0.3,
                ingredients: fruits,
            },
            SeasonalCategory {
                weight: 0.2,
                ingredients: herbs,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_map_to_seasons() {
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(5), Season::Spring);
        assert_eq!(Season::from_month(6), Season::Summer);
        assert_eq!(Season::from_month(8), Season::Summer);
        assert_eq!(Season::from_month(9), Season::Fall);
        assert_eq!(Season::from_month(11), Season::Fall);
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(2), Season::Winter);
    }

    #[test]
    fn category_weights_sum_to_one() {
        for season in [Season::Spring, Season::Summer, Season::Fall, Season::Winter] {
            let total: f64 = season.categories().iter().map(|c| c.weight).sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
    }
}
