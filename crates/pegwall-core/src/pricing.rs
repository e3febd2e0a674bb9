//! Wall pricing and order quotes.

use crate::catalog::color_name;
use crate::furniture::{InstanceId, PlacedItem};
use crate::grid::WallSpec;
use serde::{Deserialize, Serialize};

/// Hole count (3 x 4) at or below which the wall costs [`BASE_WALL_PRICE`].
pub const BASE_WALL_HOLES: u32 = 3 * 4;

/// Hole count (25 x 16) at or above which the wall costs [`MAX_WALL_PRICE`].
pub const MAX_WALL_HOLES: u32 = 25 * 16;

pub const BASE_WALL_PRICE: u32 = 165;
pub const MAX_WALL_PRICE: u32 = 4450;

/// Price of a wall with the given hole counts, in whole dollars.
///
/// Linear in the total hole count between the base and max sizes.
pub fn wall_price(horizontal_holes: usize, vertical_holes: usize) -> u32 {
    let holes = horizontal_holes.saturating_mul(vertical_holes);
    if holes <= BASE_WALL_HOLES as usize {
        return BASE_WALL_PRICE;
    }
    if holes >= MAX_WALL_HOLES as usize {
        return MAX_WALL_PRICE;
    }

    let price_per_hole = f64::from(MAX_WALL_PRICE - BASE_WALL_PRICE)
        / f64::from(MAX_WALL_HOLES - BASE_WALL_HOLES);
    let additional = (holes - BASE_WALL_HOLES as usize) as f64;
    (f64::from(BASE_WALL_PRICE) + additional * price_per_hole).round() as u32
}

/// One placed item on a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub instance_id: InstanceId,
    pub name: String,
    pub color_name: String,
    pub price: u32,
}

/// Price breakdown of a wall and everything on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub horizontal_holes: usize,
    pub vertical_holes: usize,
    pub wall_price: u32,
    pub furniture_total: u32,
    pub total: u32,
    pub line_items: Vec<LineItem>,
}

impl Quote {
    pub fn new(wall: &WallSpec, items: &[PlacedItem]) -> Self {
        let (horizontal_holes, vertical_holes) = wall.hole_counts();
        let wall_price = wall_price(horizontal_holes, vertical_holes);

        let line_items: Vec<LineItem> = items
            .iter()
            .map(|item| LineItem {
                instance_id: item.instance_id.clone(),
                name: item.spec.name.clone(),
                color_name: color_name(&item.spec.color.to_hex()).to_string(),
                price: item.spec.price,
            })
            .collect();
        let furniture_total = line_items.iter().map(|line| line.price).sum();

        Self {
            horizontal_holes,
            vertical_holes,
            wall_price,
            furniture_total,
            total: wall_price + furniture_total,
            line_items,
        }
    }

    /// Format a dollar amount the way the order summary shows it.
    pub fn format_dollars(amount: u32) -> String {
        let digits = amount.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        format!("${}.00", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use kurbo::Point;

    #[test]
    fn test_wall_price_endpoints() {
        assert_eq!(wall_price(3, 4), 165);
        assert_eq!(wall_price(1, 1), 165);
        assert_eq!(wall_price(0, 0), 165);
        assert_eq!(wall_price(25, 16), 4450);
        assert_eq!(wall_price(40, 40), 4450);
    }

    #[test]
    fn test_wall_price_interpolates() {
        // 36 extra holes at 4285 / 388 per hole
        assert_eq!(wall_price(6, 8), 563);
        assert_eq!(wall_price(11, 15), 1855);

        let mut previous = wall_price(3, 4);
        for h in 4..25 {
            let price = wall_price(h, 16);
            assert!(price >= previous);
            previous = price;
        }
    }

    #[test]
    fn test_quote_totals() {
        let catalog = Catalog::builtin();
        let wall = WallSpec::new(56.0, 52.0).unwrap();
        let cubby = catalog.configure("cubbies", "10x10", "poppy").unwrap();
        let hook = catalog.default_spec("hooks").unwrap();
        let items = vec![
            PlacedItem::new(InstanceId::new("c"), cubby, Point::new(-4.5, 15.5), -24.0),
            PlacedItem::new(InstanceId::new("h"), hook, Point::new(11.5, 3.5), -24.0),
        ];

        let quote = Quote::new(&wall, &items);
        assert_eq!((quote.horizontal_holes, quote.vertical_holes), (6, 8));
        assert_eq!(quote.wall_price, 563);
        assert_eq!(quote.furniture_total, 230 + 25);
        assert_eq!(quote.total, 563 + 255);
        assert_eq!(quote.line_items.len(), 2);
        assert_eq!(quote.line_items[0].color_name, "Poppy");
        assert_eq!(quote.line_items[1].color_name, "Natural");
    }

    #[test]
    fn test_empty_wall_quote() {
        let quote = Quote::new(&WallSpec::default(), &[]);
        assert_eq!(quote.furniture_total, 0);
        assert_eq!(quote.total, quote.wall_price);
    }

    #[test]
    fn test_format_dollars() {
        assert_eq!(Quote::format_dollars(0), "$0.00");
        assert_eq!(Quote::format_dollars(563), "$563.00");
        assert_eq!(Quote::format_dollars(4450), "$4,450.00");
        assert_eq!(Quote::format_dollars(1234567), "$1,234,567.00");
    }
}
