//! Product catalog: furniture groups with size variants and colours.
//!
//! A group is one product line (e.g. cubbies). Picking a variant and a
//! colour yields a concrete [`FurnitureSpec`] ready to be placed.

use crate::error::{PegwallError, Result};
use crate::furniture::{FurnitureKind, FurnitureSpec, Material, PegSpan, SerializableColor};
use crate::units::Dimensions;
use serde::{Deserialize, Serialize};

/// A size option within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureVariant {
    pub id: String,
    pub name: String,
    /// Nominal dimensions in inches.
    pub dimensions: Dimensions,
    /// Added to the group's base price.
    pub price: u32,
    pub peg_span: PegSpan,
}

/// A colour option within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnitureColor {
    pub id: String,
    pub name: String,
    /// `#RRGGBB`
    pub hex: String,
    /// Surcharge for this colour.
    pub price: u32,
}

/// One product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureGroup {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: FurnitureKind,
    pub material: Material,
    pub base_price: u32,
    pub variants: Vec<FurnitureVariant>,
    pub colors: Vec<FurnitureColor>,
    pub image_path: String,
}

impl FurnitureGroup {
    pub fn variant(&self, id: &str) -> Option<&FurnitureVariant> {
        self.variants.iter().find(|variant| variant.id == id)
    }

    pub fn color(&self, id: &str) -> Option<&FurnitureColor> {
        self.colors.iter().find(|color| color.id == id)
    }

    /// Price of a variant in a colour.
    pub fn price_of(&self, variant: &FurnitureVariant, color: &FurnitureColor) -> u32 {
        self.base_price + variant.price + color.price
    }
}

/// The set of groups offered in the furniture panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub groups: Vec<FurnitureGroup>,
}

/// Named colours of the standard palette, by hex code.
const PALETTE: &[(&str, &str)] = &[
    ("#FA623B", "Poppy"),
    ("#F5F5DC", "Natural"),
    ("#FFFFFF", "White"),
    ("#74B9FF", "Sky"),
    ("#2D3436", "Space"),
    ("#FDCB6E", "Ochre"),
    ("#636E72", "Charcoal"),
    ("#B2BEC3", "Ash"),
    ("#DFE6E9", "Dove"),
    ("#FF8A65", "Tangerine"),
    ("#D63031", "Sienna"),
    ("#E17055", "Rust"),
    ("#00B894", "Mint"),
    ("#A29BFE", "Pear"),
    ("#6C5CE7", "Sage"),
    ("#00CEA9", "Kiwi"),
    ("#55A3FF", "Avocado"),
];

/// Display name of a palette colour, or `"Custom"`.
pub fn color_name(hex: &str) -> &'static str {
    PALETTE
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(hex))
        .map_or("Custom", |&(_, name)| name)
}

fn variant(
    id: &str,
    name: &str,
    [width, height, depth]: [f64; 3],
    price: u32,
    [horizontal, vertical]: [u32; 2],
) -> FurnitureVariant {
    FurnitureVariant {
        id: id.to_string(),
        name: name.to_string(),
        dimensions: Dimensions::new(width, height, depth),
        price,
        peg_span: PegSpan::new(horizontal, vertical),
    }
}

fn color(id: &str, name: &str, hex: &str, price: u32) -> FurnitureColor {
    FurnitureColor {
        id: id.to_string(),
        name: name.to_string(),
        hex: hex.to_string(),
        price,
    }
}

fn painted_colors() -> Vec<FurnitureColor> {
    vec![
        color("natural", "Natural", "#F5F5DC", 0),
        color("white", "White", "#FFFFFF", 0),
        color("poppy", "Poppy", "#FA623B", 20),
        color("sky", "Sky", "#74B9FF", 20),
        color("space", "Space", "#2D3436", 20),
        color("ochre", "Ochre", "#FDCB6E", 20),
    ]
}

/// A group in the painted colours, with no variants yet.
fn group(
    id: &str,
    name: &str,
    description: &str,
    kind: FurnitureKind,
    material: Material,
) -> FurnitureGroup {
    FurnitureGroup {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        kind,
        material,
        base_price: 0,
        variants: Vec::new(),
        colors: painted_colors(),
        image_path: format!("/images/products/{}.png", id),
    }
}

impl Catalog {
    /// The standard product line.
    pub fn builtin() -> Self {
        use FurnitureKind::*;

        let cubbies = FurnitureGroup {
            variants: vec![
                variant("10x10", "10\" x 10\"", [10.0, 10.0, 10.0], 210, [2, 2]),
                variant("20x10", "20\" x 10\"", [20.0, 10.0, 10.0], 310, [3, 2]),
            ],
            ..group("cubbies", "Cubby", "Open storage boxes", Cubby, Material::Plywood)
        };
        let bookshelf = FurnitureGroup {
            variants: vec![
                variant("small", "Small", [19.0, 12.0, 8.0], 260, [3, 2]),
                variant("large", "Large", [28.0, 12.0, 8.0], 340, [4, 2]),
            ],
            ..group("bookshelf", "Bookshelf", "Shelf with side walls", Bookshelf, Material::Plywood)
        };
        let magazine_rack = FurnitureGroup {
            variants: vec![variant("standard", "Standard", [10.0, 12.0, 4.0], 95, [2, 2])],
            ..group(
                "magazine-rack",
                "Magazine Rack",
                "Front-facing rack for magazines and picture books",
                MagazineRack,
                Material::Plywood,
            )
        };
        let tables = FurnitureGroup {
            variants: vec![variant("38x29", "38\" x 29\"", [38.0, 29.0, 60.0], 1535, [4, 5])],
            colors: vec![color("oak", "Oak", "#8B4513", 0)],
            ..group("tables", "Table", "Fold-down wall table", Table, Material::Oak)
        };
        let hooks = FurnitureGroup {
            variants: vec![variant("standard", "Standard", [1.0, 8.0, 5.0], 25, [1, 1])],
            ..group("hooks", "Hook", "Single peg hook", Hook, Material::Plywood)
        };
        let easel = FurnitureGroup {
            variants: vec![variant("standard", "Standard", [28.0, 36.0, 4.0], 180, [4, 6])],
            ..group("easel", "Easel", "Double-sided drawing easel", Easel, Material::Maple)
        };
        let paper_towels = FurnitureGroup {
            variants: vec![variant("standard", "Standard", [18.0, 8.0, 6.0], 65, [3, 2])],
            ..group(
                "paper-towels",
                "Paper Towel Holder",
                "Holder for a paper roll",
                PaperTowels,
                Material::Plywood,
            )
        };

        Self {
            groups: vec![cubbies, bookshelf, magazine_rack, tables, hooks, easel, paper_towels],
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PegwallError::Config(format!("Invalid catalog: {}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PegwallError::Config(e.to_string()))
    }

    pub fn group(&self, id: &str) -> Result<&FurnitureGroup> {
        self.groups
            .iter()
            .find(|group| group.id == id)
            .ok_or_else(|| PegwallError::UnknownGroup(id.to_string()))
    }

    /// Build the spec for a group in a given size and colour.
    pub fn configure(
        &self,
        group_id: &str,
        variant_id: &str,
        color_id: &str,
    ) -> Result<FurnitureSpec> {
        let group = self.group(group_id)?;
        let variant = group.variant(variant_id).ok_or_else(|| PegwallError::UnknownVariant {
            group: group_id.to_string(),
            variant: variant_id.to_string(),
        })?;
        let color = group.color(color_id).ok_or_else(|| PegwallError::UnknownColor {
            group: group_id.to_string(),
            color: color_id.to_string(),
        })?;

        Ok(FurnitureSpec {
            id: format!("{}-{}-{}", group.id, variant.id, color.id),
            name: format!("{} - {}", group.name, variant.name),
            kind: group.kind,
            dimensions: variant.dimensions,
            color: SerializableColor::from_hex(&color.hex)?,
            material: group.material,
            price: group.price_of(variant, color),
            peg_span: variant.peg_span,
            vertical_offset: group.kind.default_vertical_offset(),
        })
    }

    /// The group's first variant in its first colour, as the panel shows it
    /// before the user picks anything.
    pub fn default_spec(&self, group_id: &str) -> Result<FurnitureSpec> {
        let group = self.group(group_id)?;
        let variant = group.variants.first().ok_or_else(|| PegwallError::UnknownVariant {
            group: group_id.to_string(),
            variant: String::new(),
        })?;
        let color = group.colors.first().ok_or_else(|| PegwallError::UnknownColor {
            group: group_id.to_string(),
            color: String::new(),
        })?;
        self.configure(group_id, &variant.id, &color.id)
    }
}
