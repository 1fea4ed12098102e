use crate::models::{ApparelNote, ConflictNote};

/// Manually maintained conflict watch list, appended to the snapshot verbatim.
pub fn conflict_notes() -> Vec<ConflictNote> {
    [
        ("Black Sea", "Drone strike uptick"),
        ("Red Sea", "Shipping insurance premia rising"),
        ("Taiwan Strait", "Increased ADIZ incursions"),
        ("Sahel", "Cross-border operations reported"),
    ]
    .into_iter()
    .map(|(name, note)| ConflictNote {
        name: name.to_string(),
        note: note.to_string(),
    })
    .collect()
}

/// Manually maintained apparel brand list.
pub fn apparel_notes() -> Vec<ApparelNote> {
    [
        ("Arc'teryx (LEAF)", "Technical shells, load-bearing apparel"),
        (
            "The North Face",
            "Extreme cold-weather lines; expedition wear",
        ),
        ("Crye Precision", "Combat uniforms & plate carriers"),
        ("5.11 Tactical", "Duty apparel & gear"),
    ]
    .into_iter()
    .map(|(brand, note)| ApparelNote {
        brand: brand.to_string(),
        note: note.to_string(),
    })
    .collect()
}
