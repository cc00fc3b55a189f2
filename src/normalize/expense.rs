//! Expense category vocabulary, label mapping and keyword categorization.

/// The canonical expense categories.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    // utilities & services
    "internet",
    "electric",
    "water",
    "heating",
    "septic",
    "pest_control",
    "trash",
    // property
    "association",
    "taxes",
    "mortgage",
    // maintenance & repairs
    "repairs",
    "plumbing",
    "painting",
    "floors",
    "windows",
    "insulation",
    "chimney",
    "fireplace",
    "basement",
    "garage",
    "kitchen",
    "bathroom",
    "outdoor",
    // interior
    "appliances",
    "furniture",
    "decor",
    "linens",
    "bedding",
    // operations
    "cleaning",
    "supplies",
    "tools",
    "solar",
    // VRBO/HomeAway fees
    "platform_fees",
    "other",
];

/// Category assigned when no keyword rule matches.
pub const OTHER: &str = "other";

/// Expense labels from the pivot sheets, including known typos and stray whitespace.
static EXPENSE_TYPES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "Wifi & cable" => "internet",
    "Internet & Wifi" => "internet",
    "Association" => "association",
    "Assocation" => "association",
    "Outdoors" => "outdoor",
    "Outdoors " => "outdoor",
    "Yard" => "outdoor",
    "Garden" => "outdoor",
    "Heat/AC system" => "heating",
    "HVAC" => "heating",
    "Heat (oil)" => "heating",
    "Heat & hot water" => "heating",
    "Appliance" => "appliances",
    "Appliances" => "appliances",
    "Furniture" => "furniture",
    "Furniture & household" => "furniture",
    "Cleaning " => "cleaning",
    "Cleaning" => "cleaning",
    "Rental taxes (MA)" => "taxes",
    "Taxes" => "taxes",
};

/// Keyword rules for free-text descriptions. The first rule with a matching keyword wins, so the
/// order matters where keyword sets overlap.
const KEYWORD_RULES: &[(&[&str], &str)] = &[
    (
        &[
            "roof",
            "ceiling",
            "wall",
            "gutter",
            "downspot",
            "patio",
            "back door",
            "entryway",
            "tile",
            "driveway",
            "fence",
        ],
        "repairs",
    ),
    (&["solar"], "solar"),
    (&["plumbing", "outdoor shower"], "plumbing"),
    (&["paint", "trim"], "painting"),
    (
        &[
            "fridge",
            "refrigerator",
            "washer",
            "dryer",
            "vacuum",
            "vaccum",
            "grill",
            "fan",
            "tv",
            "mount",
            "lamp",
            "appliance",
        ],
        "appliances",
    ),
    (
        &["yard", "mulch", "loom", "garden", "gravel", "tree", "outdoor"],
        "outdoor",
    ),
    (&["couch", "futon", "shelf", "shelves", "furniture"], "furniture"),
    (
        &[
            "décor",
            "deco",
            "homegoods",
            "home goods",
            "tj maxx",
            "marshalls",
            "pillow",
            "sheet",
        ],
        "decor",
    ),
    (&["linen", "bedding", "towel"], "linens"),
    (&["cleaning", "soap"], "cleaning"),
    (
        &[
            "supplies",
            "staples",
            "dollar tree",
            "national wholesale",
            "big lots",
            "lockbox",
        ],
        "supplies",
    ),
    (&["septic"], "septic"),
    (&["pest control", "fowler"], "pest_control"),
    (&["electric", "energy efficiency"], "electric"),
    (&["internet", "wifi", "cable"], "internet"),
    (&["heat", "hvac", "oil"], "heating"),
    (&["water"], "water"),
    (&["trash", "recycling"], "trash"),
    (&["association", "hoa"], "association"),
    (&["tax"], "taxes"),
    (&["mortgage"], "mortgage"),
    (&["homeaway", "vrbo fee"], "platform_fees"),
];

/// Maps a raw expense label to its category.
///
/// The label is looked up verbatim first, then trimmed. An unmapped label passes through trimmed
/// and lowercased.
pub fn normalize_expense_type(raw: &str) -> String {
    let trimmed = raw.trim();
    EXPENSE_TYPES
        .get(raw)
        .or_else(|| EXPENSE_TYPES.get(trimmed))
        .map(|s| s.to_string())
        .unwrap_or_else(|| trimmed.to_lowercase())
}

/// Categorizes a free-text expense description by keyword, falling back to `"other"`.
pub fn categorize_by_keywords(description: &str) -> &'static str {
    let description = description.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| description.contains(kw)))
        .map(|(_, category)| *category)
        .unwrap_or(OTHER)
}
