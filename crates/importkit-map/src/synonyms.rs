//! Static synonym dictionary for semantic header matching.
//!
//! Every entry is stored in normalized form (lowercase, separators replaced
//! by spaces) so lookups can compare against [`crate::normalize_text`]
//! output directly. The table is compiled in; there is no configuration
//! file behind it.

/// A canonical field concept and the header spellings that refer to it.
pub struct Concept {
    /// Normalized canonical field name.
    pub key: &'static str,
    /// Normalized spellings for the concept, including the key itself.
    pub synonyms: &'static [&'static str],
}

impl Concept {
    /// Whether the normalized spelling is an exact member of this concept.
    pub fn contains(&self, spelling: &str) -> bool {
        self.synonyms.contains(&spelling)
    }
}

/// Header spellings seen in real import files, keyed by canonical field name.
pub static CONCEPTS: &[Concept] = &[
    Concept {
        key: "name",
        synonyms: &[
            "name",
            "full name",
            "fullname",
            "customer name",
            "client name",
            "contact name",
            "contact",
            "person",
        ],
    },
    Concept {
        key: "first name",
        synonyms: &["first name", "firstname", "fname", "given name", "forename"],
    },
    Concept {
        key: "last name",
        synonyms: &["last name", "lastname", "lname", "surname", "family name"],
    },
    Concept {
        key: "email",
        synonyms: &[
            "email",
            "e mail",
            "email address",
            "mail",
            "electronic mail",
            "contact email",
        ],
    },
    Concept {
        key: "phone",
        synonyms: &[
            "phone",
            "telephone",
            "phone number",
            "tel",
            "mobile",
            "cell",
            "cell phone",
            "mobile number",
            "contact number",
        ],
    },
    Concept {
        key: "price",
        synonyms: &["price", "cost", "amount", "unit price", "rate", "fee", "value"],
    },
    Concept {
        key: "quantity",
        synonyms: &["quantity", "qty", "count", "units", "number of items", "amount ordered"],
    },
    Concept {
        key: "id",
        synonyms: &["id", "identifier", "key", "reference", "ref", "code", "number", "no"],
    },
    Concept {
        key: "symbol",
        synonyms: &["symbol", "ticker", "ticker symbol", "stock symbol", "code"],
    },
    Concept {
        key: "type",
        synonyms: &["type", "category", "kind", "classification", "class"],
    },
    Concept {
        key: "status",
        synonyms: &["status", "state", "condition", "stage"],
    },
    Concept {
        key: "date",
        synonyms: &["date", "created", "created at", "timestamp", "datetime", "time", "when"],
    },
    Concept {
        key: "purchase date",
        synonyms: &[
            "purchase date",
            "order date",
            "purchased",
            "purchased at",
            "date of purchase",
            "buy date",
            "sale date",
            "transaction date",
        ],
    },
    Concept {
        key: "address",
        synonyms: &["address", "street", "street address", "address line 1", "addr", "location"],
    },
    Concept {
        key: "city",
        synonyms: &["city", "town", "municipality", "locality"],
    },
    Concept {
        key: "state",
        synonyms: &["state", "province", "region", "state province"],
    },
    Concept {
        key: "zip",
        synonyms: &["zip", "zip code", "zipcode", "postal code", "postcode", "postal"],
    },
    Concept {
        key: "country",
        synonyms: &["country", "nation", "country code"],
    },
];

/// Looks up the concept whose key equals the normalized field name.
pub fn concept_for_field(name: &str) -> Option<&'static Concept> {
    CONCEPTS.iter().find(|concept| concept.key == name)
}
