//! Sticker pricing.
//!
//! Pure, deterministic mapping from `(shape, material, quantity)` to a total
//! price. All arithmetic is exact decimal; the result is rounded half-up to
//! cents once, at the final step.
//!
//! Quantity discounts are a step function over inclusive thresholds (10, 20,
//! 50), so the marginal price of one more sticker is not monotonic: crossing
//! into a tier can make the order total drop (49 die-cut gloss stickers cost
//! more than 50). That cliff is the intended promotion, not a bug.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use sticker_craft_core::{Price, StickerMaterial, StickerShape};

/// Base price per sticker for each shape, before material and quantity.
fn base_price(shape: StickerShape) -> Decimal {
    match shape {
        StickerShape::DieCut | StickerShape::KissCut => Decimal::new(350, 2),
        StickerShape::Circular | StickerShape::Oval => Decimal::new(300, 2),
        StickerShape::Square | StickerShape::Rectangle => Decimal::new(250, 2),
        StickerShape::Sheet => Decimal::new(500, 2),
    }
}

/// Price multiplier for each material finish.
fn material_multiplier(material: StickerMaterial) -> Decimal {
    match material {
        StickerMaterial::Gloss => Decimal::ONE,
        StickerMaterial::Matte => Decimal::new(11, 1),
        StickerMaterial::Holographic => Decimal::new(15, 1),
    }
}

/// Quantity discount tier, inclusive at the lower bound.
fn quantity_multiplier(quantity: NonZeroU32) -> Decimal {
    match quantity.get() {
        50.. => Decimal::new(8, 1),
        20.. => Decimal::new(9, 1),
        10.. => Decimal::new(95, 2),
        _ => Decimal::ONE,
    }
}

/// Price of a single sticker of the given shape and material, rounded to
/// cents. Quantity discounts are not applied here.
#[must_use]
pub fn unit_price(shape: StickerShape, material: StickerMaterial) -> Price {
    Price::from_decimal(base_price(shape) * material_multiplier(material))
}

/// Total price for `quantity` stickers of the given shape and material.
///
/// `total = base(shape) x multiplier(material) x quantity x tier(quantity)`,
/// rounded half-up to cents at the final step only.
#[must_use]
pub fn calculate_price(
    shape: StickerShape,
    material: StickerMaterial,
    quantity: NonZeroU32,
) -> Price {
    let total = base_price(shape)
        * material_multiplier(material)
        * Decimal::from(quantity.get())
        * quantity_multiplier(quantity);
    Price::from_decimal(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_known_totals() {
        assert_eq!(
            calculate_price(StickerShape::Square, StickerMaterial::Gloss, qty(5)),
            Price::from_cents(12_50)
        );
        // 3.50 x 1.5 x 50 x 0.8
        assert_eq!(
            calculate_price(StickerShape::DieCut, StickerMaterial::Holographic, qty(50)),
            Price::from_cents(210_00)
        );
        // 5.00 x 1.1 x 10 x 0.95
        assert_eq!(
            calculate_price(StickerShape::Sheet, StickerMaterial::Matte, qty(10)),
            Price::from_cents(52_25)
        );
        // 3.00 x 1.1 x 20 x 0.9
        assert_eq!(
            calculate_price(StickerShape::Circular, StickerMaterial::Matte, qty(20)),
            Price::from_cents(59_40)
        );
    }

    #[test]
    fn test_unit_price_ignores_quantity_tier() {
        assert_eq!(
            unit_price(StickerShape::Sheet, StickerMaterial::Matte),
            Price::from_cents(5_50)
        );
        assert_eq!(
            unit_price(StickerShape::Square, StickerMaterial::Gloss),
            Price::from_cents(2_50)
        );
    }

    #[test]
    fn test_tier_thresholds_are_inclusive() {
        let shape = StickerShape::DieCut;
        let material = StickerMaterial::Gloss;

        // 9 -> full price, 10 -> 5% off
        assert_eq!(
            calculate_price(shape, material, qty(9)),
            Price::from_cents(31_50)
        );
        assert_eq!(
            calculate_price(shape, material, qty(10)),
            Price::from_cents(33_25)
        );

        // 19 -> 5% off, 20 -> 10% off
        assert_eq!(
            calculate_price(shape, material, qty(19)),
            Price::from_decimal(Decimal::new(350, 2) * Decimal::from(19) * Decimal::new(95, 2))
        );
        assert_eq!(
            calculate_price(shape, material, qty(20)),
            Price::from_cents(63_00)
        );

        // 49 -> 10% off, 50 -> 20% off
        assert_eq!(
            calculate_price(shape, material, qty(49)),
            Price::from_decimal(Decimal::new(350, 2) * Decimal::from(49) * Decimal::new(9, 1))
        );
        assert_eq!(
            calculate_price(shape, material, qty(50)),
            Price::from_cents(140_00)
        );
    }

    #[test]
    fn test_bulk_tier_formula_for_every_combination() {
        for shape in StickerShape::ALL {
            for material in StickerMaterial::ALL {
                for quantity in [50, 100, 250, 500, 1000] {
                    let expected = Price::from_decimal(
                        base_price(shape)
                            * material_multiplier(material)
                            * Decimal::from(quantity)
                            * Decimal::new(8, 1),
                    );
                    assert_eq!(calculate_price(shape, material, qty(quantity)), expected);
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let a = calculate_price(StickerShape::Oval, StickerMaterial::Holographic, qty(23));
        let b = calculate_price(StickerShape::Oval, StickerMaterial::Holographic, qty(23));
        assert_eq!(a, b);
    }

    #[test]
    fn test_total_drops_across_bulk_boundary() {
        // The 20% bulk tier makes 50 stickers cheaper than 49.
        let at_49 = calculate_price(StickerShape::DieCut, StickerMaterial::Gloss, qty(49));
        let at_50 = calculate_price(StickerShape::DieCut, StickerMaterial::Gloss, qty(50));
        assert!(at_50 < at_49);
    }
}
