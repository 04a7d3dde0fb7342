use serde::{Deserialize, Serialize};

/// Inventory category ("pool") a stock record belongs to.
///
/// The fixed set covers the categories production planning knows about.
/// Anything else is kept by its literal label so alerts can name it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Pl,
    Pv,
    Rp,
    Mp,
    Aa,
    Oi,
    Unclassified,
    Other(String),
}

impl Category {
    /// Parse a category label. Known labels are matched case-insensitively;
    /// blank labels are `Unclassified`.
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "PL" => Category::Pl,
            "PV" => Category::Pv,
            "RP" => Category::Rp,
            "MP" => Category::Mp,
            "AA" => Category::Aa,
            "OI" => Category::Oi,
            "" | "UNCLASSIFIED" => Category::Unclassified,
            _ => Category::Other(trimmed.to_string()),
        }
    }

    /// Derive the category from a `<prefix><suffix>` code, where the suffix is
    /// the trailing `suffix_len` characters.
    pub fn from_prefixed_code(code: &str, suffix_len: usize) -> Self {
        let count = code.chars().count();
        if count <= suffix_len {
            return Category::Unclassified;
        }
        let prefix: String = code.chars().take(count - suffix_len).collect();
        Category::parse(&prefix)
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Pl => "PL",
            Category::Pv => "PV",
            Category::Rp => "RP",
            Category::Mp => "MP",
            Category::Aa => "AA",
            Category::Oi => "OI",
            Category::Unclassified => "UNCLASSIFIED",
            Category::Other(label) => label,
        }
    }

    /// Whether the category belongs to the fixed enumerated set.
    pub fn is_classified(&self) -> bool {
        !matches!(self, Category::Unclassified | Category::Other(_))
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::parse(&value)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::parse(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.label().to_string()
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_labels_case_insensitively() {
        assert_eq!(Category::parse("pl"), Category::Pl);
        assert_eq!(Category::parse(" PV "), Category::Pv);
        assert_eq!(Category::parse("Oi"), Category::Oi);
        assert_eq!(Category::parse(""), Category::Unclassified);
        assert_eq!(Category::parse("unclassified"), Category::Unclassified);
    }

    #[test]
    fn unknown_labels_keep_their_literal_text() {
        let c = Category::parse(" XQ ");
        assert_eq!(c, Category::Other("XQ".to_string()));
        assert_eq!(c.to_string(), "XQ");
        assert!(!c.is_classified());
    }

    #[test]
    fn prefix_is_everything_before_the_suffix() {
        assert_eq!(Category::from_prefixed_code("PV0040029", 7), Category::Pv);
        assert_eq!(Category::from_prefixed_code("RP0040029", 7), Category::Rp);
        assert_eq!(Category::from_prefixed_code("0040029", 7), Category::Unclassified);
        assert_eq!(
            Category::from_prefixed_code("ZZ0040029", 7),
            Category::Other("ZZ".to_string())
        );
    }

    #[test]
    fn serializes_as_plain_label() {
        let json = serde_json::to_string(&vec![Category::Mp, Category::parse("XQ")]).unwrap();
        assert_eq!(json, r#"["MP","XQ"]"#);
        let back: Vec<Category> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Category::Mp, Category::Other("XQ".to_string())]);
    }
}
