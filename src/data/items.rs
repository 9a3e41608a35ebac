use crate::shared::*;

/// Populate the ItemRegistry with the full item catalog: one seed and one
/// produce kind per crop, related by the `"_seeds"` naming convention.
pub fn populate_items(registry: &mut ItemRegistry) {
    let items: Vec<ItemDef> = vec![
        // ── Seeds ───────────────────────────────────────────────────────
        ItemDef {
            id: "carrot_seeds".into(),
            name: "Carrot Seeds".into(),
            category: ItemCategory::Seed,
            max_stack: 99,
        },
        ItemDef {
            id: "tomato_seeds".into(),
            name: "Tomato Seeds".into(),
            category: ItemCategory::Seed,
            max_stack: 99,
        },
        ItemDef {
            id: "potato_seeds".into(),
            name: "Potato Seeds".into(),
            category: ItemCategory::Seed,
            max_stack: 99,
        },
        // ── Produce ─────────────────────────────────────────────────────
        ItemDef {
            id: "carrot".into(),
            name: "Carrot".into(),
            category: ItemCategory::Produce,
            max_stack: 99,
        },
        ItemDef {
            id: "tomato".into(),
            name: "Tomato".into(),
            category: ItemCategory::Produce,
            max_stack: 99,
        },
        ItemDef {
            id: "potato".into(),
            name: "Potato".into(),
            category: ItemCategory::Produce,
            max_stack: 99,
        },
    ];

    for item in items {
        registry.insert(item);
    }
}
